//! WGSL module assembly. WGSL has no includes, so the clip-space prelude is
//! prepended to each stage source.

const CLIP_PRELUDE: &str = include_str!("shaders/clip.wgsl");

const POINTS: &str = include_str!("shaders/points.wgsl");
const LINES: &str = include_str!("shaders/lines.wgsl");
const SPRITES: &str = include_str!("shaders/sprites.wgsl");

/// Entry point shared by every fragment stage.
pub(crate) const FRAGMENT_ENTRY_POINT: &str = "fs_main";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ShaderKind {
    Points,
    Lines,
    Sprites,
}

impl ShaderKind {
    pub(crate) fn source(self) -> String {
        let body = match self {
            ShaderKind::Points => POINTS,
            ShaderKind::Lines => LINES,
            ShaderKind::Sprites => SPRITES,
        };
        format!("{CLIP_PRELUDE}\n{body}")
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ShaderKind::Points => "pixclip points shader",
            ShaderKind::Lines => "pixclip lines shader",
            ShaderKind::Sprites => "pixclip sprites shader",
        }
    }

    pub(crate) fn create_module(self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label()),
            source: wgpu::ShaderSource::Wgsl(self.source().into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ScreenOrigin;

    const ALL: [ShaderKind; 3] = [ShaderKind::Points, ShaderKind::Lines, ShaderKind::Sprites];

    fn parse(kind: ShaderKind) -> naga::Module {
        naga::front::wgsl::parse_str(&kind.source())
            .unwrap_or_else(|e| panic!("{kind:?} failed to parse: {e}"))
    }

    #[test]
    fn every_module_validates() {
        for kind in ALL {
            let module = parse(kind);
            let mut validator = naga::valid::Validator::new(
                naga::valid::ValidationFlags::all(),
                naga::valid::Capabilities::empty(),
            );
            if let Err(e) = validator.validate(&module) {
                panic!("{kind:?} failed validation: {e:?}");
            }
        }
    }

    #[test]
    fn every_module_exposes_both_vertex_paths_and_fragment() {
        for kind in ALL {
            let module = parse(kind);
            let has = |name: &str, stage: naga::ShaderStage| {
                module.entry_points.iter().any(|ep| ep.name == name && ep.stage == stage)
            };
            for origin in [ScreenOrigin::TopLeft, ScreenOrigin::BottomLeft] {
                assert!(
                    has(origin.vertex_entry_point(), naga::ShaderStage::Vertex),
                    "{kind:?} lacks {}",
                    origin.vertex_entry_point()
                );
            }
            assert!(has(FRAGMENT_ENTRY_POINT, naga::ShaderStage::Fragment), "{kind:?} lacks fs");
        }
    }

    #[test]
    fn prelude_defines_both_mappers() {
        let module = parse(ShaderKind::Lines);
        let names: Vec<_> = module.functions.iter().filter_map(|(_, f)| f.name.as_deref()).collect();
        assert!(names.contains(&"clip_from_top_left"));
        assert!(names.contains(&"clip_from_bottom_left"));
    }

    #[test]
    fn only_sprites_flip_texture_coordinates() {
        assert!(ShaderKind::Sprites.source().contains("1.0 - uv.y"));
        assert!(!ShaderKind::Points.source().contains("uv"));
        assert!(!ShaderKind::Lines.source().contains("uv"));
    }
}
