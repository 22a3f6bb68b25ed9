use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Physical buffer extent for a logical size at `pixel_ratio`.
pub fn physical_extent(width: f32, height: f32, pixel_ratio: f32) -> PhysicalSize<u32> {
    let to_px = |v: f32| {
        let px = (v.max(0.0) * pixel_ratio).round();
        if px.is_finite() { px as u32 } else { 0 }
    };
    PhysicalSize::new(to_px(width), to_px(height))
}

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| caps.formats.contains(f)) {
            return Some(f);
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Reconfigures the swapchain for `new_size`.
///
/// wgpu cannot configure a 0x0 surface; in that case only `size` is updated and
/// configuration waits for the next non-empty resize.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.width > 0 && size.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_scales_and_rounds() {
        assert_eq!(physical_extent(800.0, 600.0, 2.0), PhysicalSize::new(1600, 1200));
        assert_eq!(physical_extent(333.3, 100.0, 1.5), PhysicalSize::new(500, 150));
    }

    #[test]
    fn extent_of_empty_or_bogus_size_is_zero() {
        assert_eq!(physical_extent(0.0, 0.0, 2.0), PhysicalSize::new(0, 0));
        assert_eq!(physical_extent(-10.0, f32::NAN, 1.0), PhysicalSize::new(0, 0));
    }
}
