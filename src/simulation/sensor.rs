//! Ray-cast distance sensor.
//!
//! A sensor casts a fan of rays from the vehicle's center and records, per
//! ray, the closest crossing with road borders or traffic edges. The vehicle
//! hands its [`Pose`] in on every call instead of the sensor holding on to it.

use geo::Line;
use ndarray::Array1;

use super::geometric_utils::{
    Intersection, Point, Polygon, Segment, intersect_segments, lerp, nearest_intersection, project,
};

/// Where a vehicle is and where it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Vehicle center.
    pub center: Point,
    /// Heading in degrees, 0 = up.
    pub heading_deg: f32,
}

/// Fan of rays with per-ray nearest detections.
#[derive(Debug, Clone)]
pub struct Sensor {
    ray_count: usize,
    ray_length: f32,
    ray_spread: f32,
    rays: Vec<Segment>,
    detections: Vec<Option<Intersection>>,
}

impl Sensor {
    /// Creates a sensor.
    ///
    /// # Arguments
    ///
    /// * `ray_count` - Number of rays, at least 1
    /// * `ray_length` - Reach of each ray in world units
    /// * `ray_spread` - Angle between the outermost rays in radians
    pub fn new(ray_count: usize, ray_length: f32, ray_spread: f32) -> Self {
        assert!(ray_count > 0, "sensor needs at least one ray");
        Self {
            ray_count,
            ray_length,
            ray_spread,
            rays: Vec::with_capacity(ray_count),
            detections: Vec::with_capacity(ray_count),
        }
    }

    /// Number of rays.
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Reach of each ray.
    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// Angle between the outermost rays, radians.
    pub fn ray_spread(&self) -> f32 {
        self.ray_spread
    }

    /// Absolute angle of ray `index` for a vehicle heading of `heading_rad`.
    ///
    /// Ray 0 is the leftmost (+spread/2), the last ray the rightmost. A single
    /// ray points straight along the heading.
    pub fn ray_angle(&self, index: usize, heading_rad: f32) -> f32 {
        let t = if self.ray_count == 1 {
            0.5
        } else {
            index as f32 / (self.ray_count - 1) as f32
        };
        lerp(self.ray_spread / 2.0, -self.ray_spread / 2.0, t) + heading_rad
    }

    /// Rebuilds the rays for `pose`.
    pub fn cast_rays(&mut self, pose: &Pose) {
        let heading_rad = pose.heading_deg.to_radians();
        self.rays = (0..self.ray_count)
            .map(|i| {
                let angle = self.ray_angle(i, heading_rad);
                Line::new(pose.center, project(pose.center, angle, self.ray_length))
            })
            .collect();
    }

    /// Recasts the rays and records the closest hit of each one.
    ///
    /// # Arguments
    ///
    /// * `pose` - Current pose of the owning vehicle
    /// * `borders` - Road border segments
    /// * `traffic` - Polygons of the vehicles this sensor can see
    pub fn update(&mut self, pose: &Pose, borders: &[Segment], traffic: &[&Polygon]) {
        self.cast_rays(pose);
        self.detections = self
            .rays
            .iter()
            .map(|ray| reading(ray, borders, traffic))
            .collect();
    }

    /// Current rays, one per index.
    pub fn rays(&self) -> &[Segment] {
        &self.rays
    }

    /// Closest hit per ray, parallel to [`Sensor::rays`].
    pub fn detections(&self) -> &[Option<Intersection>] {
        &self.detections
    }

    /// Where each ray stops: its hit point, or its far end when nothing was hit.
    pub fn reading_ends(&self) -> Vec<Point> {
        self.rays
            .iter()
            .zip(&self.detections)
            .map(|(ray, hit)| hit.map_or(ray.end, |hit| hit.point))
            .collect()
    }

    /// Network inputs: 0 for a clear ray, rising to 1 as the obstacle nears.
    pub fn signals(&self) -> Array1<f32> {
        let mut signals = Array1::zeros(self.ray_count);
        for (signal, hit) in signals.iter_mut().zip(&self.detections) {
            *signal = hit.map_or(0.0, |hit| (1.0 - hit.offset).clamp(0.0, 1.0));
        }
        signals
    }
}

fn reading(ray: &Segment, borders: &[Segment], traffic: &[&Polygon]) -> Option<Intersection> {
    let border_hits = borders
        .iter()
        .filter_map(|border| intersect_segments(ray, border));
    let traffic_hits = traffic
        .iter()
        .flat_map(|polygon| polygon.edges())
        .filter_map(|edge| intersect_segments(ray, &edge));

    nearest_intersection(border_hits.chain(traffic_hits))
}
