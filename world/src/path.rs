//! Arc-length parametrized polyline that enemies follow.

use rampart_core::WorldPoint;

/// Ordered waypoint polyline with precomputed cumulative segment lengths.
///
/// Built once when the level is configured and read-only afterwards. A
/// normalized progress value in `[0, 1]` maps to a position by distance
/// traveled along the path, not by waypoint index.
#[derive(Clone, Debug)]
pub struct Path {
    waypoints: Vec<WorldPoint>,
    cumulative: Vec<f32>,
    total_length: f32,
}

impl Path {
    /// Builds a path from ordered waypoints.
    ///
    /// An empty list degenerates to a single point at the origin so that
    /// [`Path::point_at`] stays total; a single waypoint yields a
    /// zero-length path that always resolves to that waypoint.
    #[must_use]
    pub(crate) fn from_waypoints(waypoints: &[WorldPoint]) -> Self {
        let waypoints: Vec<WorldPoint> = if waypoints.is_empty() {
            vec![WorldPoint::new(0.0, 0.0)]
        } else {
            waypoints.to_vec()
        };

        let mut cumulative = Vec::with_capacity(waypoints.len().saturating_sub(1));
        let mut total_length = 0.0;
        for pair in waypoints.windows(2) {
            total_length += pair[0].distance_squared(pair[1]).sqrt();
            cumulative.push(total_length);
        }

        Self {
            waypoints,
            cumulative,
            total_length,
        }
    }

    /// Total arc length of the path in world units.
    #[must_use]
    pub const fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Ordered waypoints composing the path.
    #[must_use]
    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    /// Maps a normalized progress value to a position along the path.
    ///
    /// `t <= 0` yields the first waypoint and `t >= 1` the last. An arc
    /// length landing exactly on a segment boundary is attributed to the
    /// segment that starts there, which keeps movement continuous with no
    /// double-counting and skips zero-length interior segments. A degenerate
    /// path with zero total length always returns the first waypoint.
    #[must_use]
    pub fn point_at(&self, t: f32) -> WorldPoint {
        let first = self.waypoints[0];
        if self.total_length <= 0.0 {
            return first;
        }

        let t = t.clamp(0.0, 1.0);
        let target = t * self.total_length;

        let mut start = 0.0;
        for (segment, end) in self.cumulative.iter().copied().enumerate() {
            if end > target {
                let length = end - start;
                let local = (target - start) / length;
                let from = self.waypoints[segment];
                let to = self.waypoints[segment + 1];
                return WorldPoint::new(
                    from.x() + (to.x() - from.x()) * local,
                    from.y() + (to.y() - from.y()) * local,
                );
            }
            start = end;
        }

        self.waypoints[self.waypoints.len() - 1]
    }
}
