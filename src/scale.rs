/// Intrinsic grid dimensions, in logical pixels at zoom 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub unit_width: f32,
    pub unit_height: f32,
    pub label_width: f32,
    /// Ceiling for interactive zoom.
    pub max_zoom: f32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            unit_width: 24.0,
            unit_height: 24.0,
            label_width: 80.0,
            max_zoom: 2.0,
        }
    }
}

/// How a grid of side N fits the available width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Available width over intrinsic width.
    pub scale: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Viewport height that shows the whole grid at `scale` without scrolling.
    pub rendered_height: f32,
}

impl GridMetrics {
    pub fn intrinsic_width(&self, size: usize) -> f32 {
        size as f32 * self.unit_width + self.label_width
    }

    /// Scale factor fitting a grid of side `size` into `available_width`.
    ///
    /// Degenerate widths measure as one pixel, so the result is always finite
    /// and positive.
    pub fn fit(&self, available_width: f32, size: usize) -> Fit {
        let available = if available_width.is_finite() && available_width > 0.0 {
            available_width
        } else {
            1.0
        };
        let intrinsic = self.intrinsic_width(size).max(1.0);
        let scale = available / intrinsic;
        Fit {
            scale,
            min_zoom: scale.min(self.max_zoom),
            max_zoom: self.max_zoom,
            rendered_height: scale * size as f32 * self.unit_height,
        }
    }
}

/// Interactive zoom, bounded by the current fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    zoom: f32,
    step: f32,
    fit: Fit,
}

impl ZoomState {
    pub fn new(fit: Fit, step: f32) -> Self {
        Self {
            zoom: fit.min_zoom,
            step: step.max(1.01),
            fit,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn fit(&self) -> Fit {
        self.fit
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * self.step).min(self.fit.max_zoom).max(self.fit.min_zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / self.step).max(self.fit.min_zoom);
    }

    pub fn reset(&mut self) {
        self.zoom = self.fit.min_zoom;
    }

    /// Adopt a new fit (resize or different grid) and return to it.
    pub fn refit(&mut self, fit: Fit) {
        self.fit = fit;
        self.reset();
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < self.fit.max_zoom
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > self.fit.min_zoom
    }
}
