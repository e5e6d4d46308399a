use crate::settings::ScreenPoint;

/// Screen area a reference image was found in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub score: f32,
}

impl MatchRegion {
    pub fn center(&self) -> ScreenPoint {
        (self.left + self.width / 2, self.top + self.height / 2)
    }

    /// Rebuild the matched area from the point the matcher reports (the
    /// template's center) and the template size. Near the screen edge the
    /// area is clipped evenly on both sides so `center()` stays put.
    pub fn around(center: ScreenPoint, size: (u32, u32), score: f32) -> Self {
        let (left, width) = clip_span(center.0, size.0);
        let (top, height) = clip_span(center.1, size.1);
        Self {
            left,
            top,
            width,
            height,
            score,
        }
    }
}

fn clip_span(center: u32, extent: u32) -> (u32, u32) {
    let start = center.saturating_sub(extent / 2);
    (start, 2 * (center - start) + extent % 2)
}

/// Pick the highest scoring match at or above `confidence`
pub fn best_match(matches: &[(u32, u32, f32)], confidence: f32) -> Option<(u32, u32, f32)> {
    matches
        .iter()
        .copied()
        .filter(|(_, _, score)| *score >= confidence)
        .max_by(|a, b| a.2.total_cmp(&b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let region = MatchRegion { left: 100, top: 40, width: 60, height: 21, score: 0.9 };
        assert_eq!(region.center(), (130, 50));
    }

    #[test]
    fn test_around_round_trips_center() {
        let region = MatchRegion::around((763, 719), (48, 48), 0.95);
        assert_eq!((region.left, region.top), (739, 695));
        assert_eq!(region.center(), (763, 719));
    }

    #[test]
    fn test_around_keeps_center_at_screen_edge() {
        let region = MatchRegion::around((5, 3), (40, 20), 0.9);
        assert_eq!((region.left, region.top), (0, 0));
        assert_eq!((region.width, region.height), (10, 6));
        assert_eq!(region.center(), (5, 3));
    }

    #[test]
    fn test_around_odd_template_size() {
        let region = MatchRegion::around((100, 50), (41, 21), 0.9);
        assert_eq!((region.width, region.height), (41, 21));
        assert_eq!(region.center(), (100, 50));

        let clipped = MatchRegion::around((7, 2), (41, 21), 0.9);
        assert_eq!(clipped.center(), (7, 2));
    }

    #[test]
    fn test_best_match() {
        let matches = [(10, 10, 0.81), (20, 20, 0.97), (30, 30, 0.5)];
        assert_eq!(best_match(&matches, 0.8), Some((20, 20, 0.97)));
        assert_eq!(best_match(&matches, 0.98), None);
        assert_eq!(best_match(&[], 0.8), None);
    }
}
