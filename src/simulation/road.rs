//! Lane geometry and road borders.

use geo::Line;

use super::config::RoadConfig;
use super::geometric_utils::{Point, Segment};

/// Vertical reach of the borders. Large but finite so intersection math stays exact.
pub const ROAD_EXTENT: f32 = 1_000_000.0;

/// Fraction of the width trimmed from each side to place the borders.
const BORDER_INSET: f32 = 0.05;

/// A straight vertical road split into lanes.
#[derive(Debug, Clone)]
pub struct Road {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    lane_count: usize,
    borders: [Segment; 2],
    dash_length: f32,
    dash_gap: f32,
    /// Dash scroll offset, wraps within `dash_length + dash_gap`.
    pub scroll: f32,
    /// Scroll added per [`Road::advance`].
    pub scroll_speed: f32,
}

impl Road {
    /// Creates a road centered on `center_x`.
    ///
    /// # Arguments
    ///
    /// * `center_x` - X of the center line
    /// * `width` - Full width; the borders sit 5% inside each edge
    /// * `lane_count` - Number of lanes, at least 1
    pub fn new(center_x: f32, width: f32, lane_count: usize) -> Self {
        assert!(lane_count > 0, "road needs at least one lane");

        let margin = width * BORDER_INSET;
        let left = center_x - width / 2.0 + margin;
        let right = center_x + width / 2.0 - margin;
        let top = -ROAD_EXTENT;
        let bottom = ROAD_EXTENT;

        let top_left = Point { x: left, y: top };
        let bottom_left = Point { x: left, y: bottom };
        let top_right = Point { x: right, y: top };
        let bottom_right = Point { x: right, y: bottom };

        Self {
            left,
            right,
            top,
            bottom,
            lane_count,
            borders: [
                Line::new(top_left, bottom_left),
                Line::new(top_right, bottom_right),
            ],
            dash_length: 20.0,
            dash_gap: 20.0,
            scroll: 0.0,
            scroll_speed: 0.0,
        }
    }

    /// Creates a road from its config section.
    pub fn from_config(config: &RoadConfig) -> Self {
        let mut road = Self::new(config.center_x, config.width, config.lane_count);
        road.dash_length = config.dash_length;
        road.dash_gap = config.dash_gap;
        road.scroll_speed = config.scroll_speed;
        road
    }

    /// X of the left border.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// X of the right border.
    pub fn right(&self) -> f32 {
        self.right
    }

    /// Y of the top end of the borders.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Y of the bottom end of the borders.
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Width of one lane.
    pub fn lane_width(&self) -> f32 {
        (self.right - self.left) / self.lane_count as f32
    }

    /// Left and right border segments, top to bottom.
    pub fn borders(&self) -> &[Segment] {
        &self.borders
    }

    /// Left x that centers an entity of `entity_width` in lane `lane_index`.
    ///
    /// Lane 0 is the leftmost; indices past the last lane use the last lane.
    pub fn lane_center(&self, lane_index: usize, entity_width: f32) -> f32 {
        let lane = lane_index.min(self.lane_count - 1);
        let lane_width = self.lane_width();
        self.left + lane_width / 2.0 + lane as f32 * lane_width - entity_width / 2.0
    }

    /// X positions of the dashed dividers between lanes.
    pub fn divider_positions(&self) -> Vec<f32> {
        let lane_width = self.lane_width();
        (1..self.lane_count)
            .map(|i| self.left + i as f32 * lane_width)
            .collect()
    }

    /// Length of one dash plus its gap.
    pub fn dash_period(&self) -> f32 {
        self.dash_length + self.dash_gap
    }

    /// Advances the dash scroll by one tick. Borders are unaffected.
    pub fn advance(&mut self) {
        self.scroll = (self.scroll + self.scroll_speed).rem_euclid(self.dash_period());
    }
}
