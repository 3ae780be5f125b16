use chrono::NaiveDate;

/// Granularity of one header row in the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleUnit {
    Month,
    Week,
    Day,
}

/// One row of the stacked timeline header: unit, step and a chrono format
/// string for the cell labels.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub unit: ScaleUnit,
    pub step: u32,
    pub format: &'static str,
}

/// Month / week / day rows, top to bottom.
pub fn default_scales() -> Vec<Scale> {
    vec![
        Scale { unit: ScaleUnit::Month, step: 1, format: "%b %Y" },
        Scale { unit: ScaleUnit::Week, step: 1, format: "W%V" },
        Scale { unit: ScaleUnit::Day, step: 1, format: "%-d" },
    ]
}

/// Manages the visible viewport of the timeline.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date.
    pub end: NaiveDate,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            pixels_per_day: 18.0,
        }
    }

    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        days * self.pixels_per_day
    }

    /// Convert an x-pixel offset back to a date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        let days = (x / self.pixels_per_day).round() as i64;
        self.start + chrono::Duration::days(days)
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end)
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(80.0);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(2.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn date_x_roundtrip() {
        let viewport = TimelineViewport::new(date(1, 1), date(6, 30));
        let day = date(3, 15);
        assert_eq!(viewport.x_to_date(viewport.date_to_x(day)), day);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = TimelineViewport::new(date(1, 1), date(2, 1));
        for _ in 0..100 {
            viewport.zoom_in();
        }
        assert!(viewport.pixels_per_day <= 80.0);
        for _ in 0..100 {
            viewport.zoom_out();
        }
        assert!(viewport.pixels_per_day >= 2.0);
    }

    #[test]
    fn default_scales_stack_month_week_day() {
        let scales = default_scales();
        let units: Vec<ScaleUnit> = scales.iter().map(|s| s.unit).collect();
        assert_eq!(units, vec![ScaleUnit::Month, ScaleUnit::Week, ScaleUnit::Day]);
    }
}
