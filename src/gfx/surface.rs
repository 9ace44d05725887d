//! Render surface sizing and resize observation.

use winit::window::Window;

/// Size of a render surface in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for an empty surface.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// A minimized window reports a zero-area surface.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Anything the engine can be mounted on
pub trait RenderSurface {
    fn size(&self) -> SurfaceSize;
}

impl RenderSurface for SurfaceSize {
    fn size(&self) -> SurfaceSize {
        *self
    }
}

impl RenderSurface for Window {
    fn size(&self) -> SurfaceSize {
        self.inner_size().into()
    }
}

/// Filters surface size notifications down to actual changes.
#[derive(Debug, Clone)]
pub struct ResizeObserver {
    last: SurfaceSize,
}

impl ResizeObserver {
    pub fn new(initial: SurfaceSize) -> Self {
        Self { last: initial }
    }

    /// Returns the new size when it differs from the last one seen and is not
    /// empty.
    pub fn notify(&mut self, size: SurfaceSize) -> Option<SurfaceSize> {
        if size.is_empty() || size == self.last {
            return None;
        }
        self.last = size;
        Some(size)
    }

    pub fn last(&self) -> SurfaceSize {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect() {
        assert_eq!(SurfaceSize::new(800, 400).aspect(), 2.0);
        assert_eq!(SurfaceSize::new(800, 0).aspect(), 1.0);
    }

    #[test]
    fn test_observer_reports_changes_only() {
        let mut observer = ResizeObserver::new(SurfaceSize::new(100, 100));
        assert_eq!(observer.notify(SurfaceSize::new(100, 100)), None);
        assert_eq!(
            observer.notify(SurfaceSize::new(200, 100)),
            Some(SurfaceSize::new(200, 100))
        );
        assert_eq!(observer.notify(SurfaceSize::new(0, 100)), None);
        assert_eq!(observer.last(), SurfaceSize::new(200, 100));
    }
}
