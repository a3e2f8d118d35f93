//! Calendar grid geometry.
//!
//! Bidirectional mapping between time-of-day and vertical pixel position on
//! a fixed-resolution day grid, used both for rendering appointment blocks
//! and for interpreting pointer positions during drag/resize.

use crate::defaults::{
    DAY_END_MINUTES, DAY_START_MINUTES, GRID_STEP_MINUTES, MIN_RENDER_HEIGHT_PX,
};

/// A day grid: fixed visible window, configurable vertical scale.
#[derive(Debug, Clone, Copy)]
pub struct CalendarGrid {
    pub day_start_minutes: i32,
    pub day_end_minutes: i32,
    /// Vertical scale; varies by viewport.
    pub pixels_per_hour: f32,
}

impl Default for CalendarGrid {
    fn default() -> Self {
        Self {
            day_start_minutes: DAY_START_MINUTES,
            day_end_minutes: DAY_END_MINUTES,
            pixels_per_hour: 60.0,
        }
    }
}

impl CalendarGrid {
    pub fn with_scale(pixels_per_hour: f32) -> Self {
        Self {
            pixels_per_hour,
            ..Default::default()
        }
    }

    /// Pixel offset for a minute offset from the day-window start.
    pub fn minutes_to_pixels(&self, minutes_from_day_start: i32) -> f32 {
        minutes_from_day_start as f32 / 60.0 * self.pixels_per_hour
    }

    /// Inverse of [`minutes_to_pixels`](Self::minutes_to_pixels).
    pub fn pixels_to_minutes(&self, pixels: f32) -> i32 {
        (pixels / self.pixels_per_hour * 60.0).round() as i32
    }

    /// Minutes-from-midnight for an absolute pointer offset on the grid.
    pub fn time_at_pixel(&self, pixels: f32) -> i32 {
        self.day_start_minutes + self.pixels_to_minutes(pixels)
    }

    /// Round to the nearest grid step, then clamp into the visible window.
    pub fn snap_to_grid(&self, minutes_from_midnight: i32) -> i32 {
        let step = GRID_STEP_MINUTES;
        let snapped = ((minutes_from_midnight as f64 / step as f64).round() as i32) * step;
        snapped.clamp(self.day_start_minutes, self.day_end_minutes)
    }

    /// Block height for a duration, floored at a minimum render height so
    /// short visits stay clickable. Presentation only; scheduling math
    /// never reads this back.
    pub fn height_for_duration(&self, duration_minutes: i32) -> f32 {
        self.minutes_to_pixels(duration_minutes.max(0))
            .max(MIN_RENDER_HEIGHT_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_mapping_round_trips() {
        let grid = CalendarGrid::with_scale(80.0);
        for minutes in [0, 15, 90, 200, 960] {
            let pixels = grid.minutes_to_pixels(minutes);
            assert_eq!(grid.pixels_to_minutes(pixels), minutes);
        }
    }

    #[test]
    fn scale_changes_pixel_size() {
        let small = CalendarGrid::with_scale(40.0);
        let large = CalendarGrid::with_scale(120.0);
        assert_eq!(small.minutes_to_pixels(60), 40.0);
        assert_eq!(large.minutes_to_pixels(60), 120.0);
    }

    #[test]
    fn snap_rounds_to_quarter_hours() {
        let grid = CalendarGrid::default();
        assert_eq!(grid.snap_to_grid(547), 540); // 9:07 -> 9:00
        assert_eq!(grid.snap_to_grid(548), 555); // 9:08 -> 9:15
        assert_eq!(grid.snap_to_grid(555), 555);
    }

    #[test]
    fn snap_clamps_into_day_window() {
        let grid = CalendarGrid::default();
        assert_eq!(grid.snap_to_grid(0), DAY_START_MINUTES);
        assert_eq!(grid.snap_to_grid(23 * 60), DAY_END_MINUTES);
    }

    #[test]
    fn snap_is_always_grid_aligned_and_in_window() {
        let grid = CalendarGrid::default();
        for minutes in (0..(24 * 60)).step_by(7) {
            let snapped = grid.snap_to_grid(minutes);
            assert_eq!(snapped % GRID_STEP_MINUTES, 0);
            assert!(snapped >= DAY_START_MINUTES);
            assert!(snapped <= DAY_END_MINUTES);
        }
    }

    #[test]
    fn height_has_presentation_floor() {
        let grid = CalendarGrid::with_scale(60.0);
        // 15 minutes at 60 px/h is 15 px, below the floor.
        assert_eq!(grid.height_for_duration(15), MIN_RENDER_HEIGHT_PX);
        assert_eq!(grid.height_for_duration(120), 120.0);
        assert_eq!(grid.height_for_duration(-30), MIN_RENDER_HEIGHT_PX);
    }

    #[test]
    fn time_at_pixel_is_window_anchored() {
        let grid = CalendarGrid::with_scale(60.0);
        // 0 px is the top of the 06:00 window.
        assert_eq!(grid.time_at_pixel(0.0), DAY_START_MINUTES);
        assert_eq!(grid.time_at_pixel(180.0), DAY_START_MINUTES + 180);
    }
}
