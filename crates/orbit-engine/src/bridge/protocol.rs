/// Frame buffer layout shared with the page.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 32 floats]
/// [Stars: max_stars × 8 floats]
/// [Meteors: max_meteors × 8 floats]
/// [Targets: max_targets × 12 floats]
/// [Belt points: max_belt_points × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The page reads them from the header to compute offsets dynamically.

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::SceneEvent;
use crate::renderer::instance::{BeltInstance, StarInstance, TargetInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 32;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_VIEWPORT_WIDTH: usize = 2;
pub const HEADER_VIEWPORT_HEIGHT: usize = 3;
pub const HEADER_VIEWPORT_DPR: usize = 4;
pub const HEADER_CAMERA_PAN_X: usize = 5;
pub const HEADER_CAMERA_PAN_Y: usize = 6;
pub const HEADER_CAMERA_ZOOM: usize = 7;
pub const HEADER_SHIP_X: usize = 8;
pub const HEADER_SHIP_Y: usize = 9;
pub const HEADER_SHIP_HEADING: usize = 10;
pub const HEADER_SHIP_SCALE: usize = 11;
pub const HEADER_SHIP_ENGINE: usize = 12;
pub const HEADER_WARP_PHASE: usize = 13;
pub const HEADER_WARP_THEME: usize = 14;
pub const HEADER_WARP_PROGRESS: usize = 15;
pub const HEADER_WARP_CAUSE: usize = 16;
pub const HEADER_ACTIVE_ROOM: usize = 17;
pub const HEADER_HOVERED: usize = 18;
pub const HEADER_STAGE_READY: usize = 19;
pub const HEADER_STAR_COUNT: usize = 20;
pub const HEADER_METEOR_COUNT: usize = 21;
pub const HEADER_TARGET_COUNT: usize = 22;
pub const HEADER_BELT_POINT_COUNT: usize = 23;
pub const HEADER_EVENT_COUNT: usize = 24;
pub const HEADER_MAX_STARS: usize = 25;
pub const HEADER_MAX_METEORS: usize = 26;
pub const HEADER_MAX_TARGETS: usize = 27;
pub const HEADER_MAX_BELT_POINTS: usize = 28;
pub const HEADER_MAX_EVENTS: usize = 29;
pub const HEADER_STAR_SPEED: usize = 30;
pub const HEADER_STAR_MODE: usize = 31;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_stars: usize,
    pub max_meteors: usize,
    pub max_targets: usize,
    pub max_belt_points: usize,
    pub max_events: usize,

    pub star_data_floats: usize,
    pub meteor_data_floats: usize,
    pub target_data_floats: usize,
    pub belt_data_floats: usize,
    pub event_data_floats: usize,

    /// Offsets (in floats) where each section begins.
    pub star_data_offset: usize,
    pub meteor_data_offset: usize,
    pub target_data_offset: usize,
    pub belt_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_stars: usize,
        max_meteors: usize,
        max_targets: usize,
        max_belt_points: usize,
        max_events: usize,
    ) -> Self {
        let star_data_floats = max_stars * StarInstance::FLOATS;
        let meteor_data_floats = max_meteors * StarInstance::FLOATS;
        let target_data_floats = max_targets * TargetInstance::FLOATS;
        let belt_data_floats = max_belt_points * BeltInstance::FLOATS;
        let event_data_floats = max_events * SceneEvent::FLOATS;

        let star_data_offset = HEADER_FLOATS;
        let meteor_data_offset = star_data_offset + star_data_floats;
        let target_data_offset = meteor_data_offset + meteor_data_floats;
        let belt_data_offset = target_data_offset + target_data_floats;
        let event_data_offset = belt_data_offset + belt_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_stars,
            max_meteors,
            max_targets,
            max_belt_points,
            max_events,
            star_data_floats,
            meteor_data_floats,
            target_data_floats,
            belt_data_floats,
            event_data_floats,
            star_data_offset,
            meteor_data_offset,
            target_data_offset,
            belt_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a SceneConfig.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(
            config.stars.count,
            config.stars.meteor_max,
            config.max_targets,
            config.max_belt_points,
            config.max_events,
        )
    }
}

/// Scalar state written into the header each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u64,
    pub viewport: Vec2,
    pub dpr: f32,
    pub pan: Vec2,
    pub zoom: f32,
    pub ship_pos: Vec2,
    pub ship_heading_deg: f32,
    pub ship_scale: f32,
    pub engine_on: bool,
    pub warp_phase: f32,
    pub warp_theme: u32,
    pub warp_progress: f32,
    pub warp_cause: f32,
    pub room: usize,
    pub hovered: Option<usize>,
    pub stage_ready: bool,
    pub star_speed: f32,
    pub streaking: bool,
}

/// Per-frame sections in wire order.
pub struct FrameSections<'a> {
    pub stars: &'a [StarInstance],
    pub meteors: &'a [StarInstance],
    pub targets: &'a [TargetInstance],
    pub belts: &'a [BeltInstance],
    pub events: &'a [SceneEvent],
}

/// The flat float buffer the page reads after each frame.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
    overflow_reported: bool,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data, overflow_reported: false }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Write one frame. Sections longer than their capacity are truncated.
    pub fn write(&mut self, header: &FrameHeader, sections: &FrameSections<'_>) {
        let layout = self.layout.clone();
        let stars = self.copy_section(layout.star_data_offset, layout.max_stars, sections.stars, "stars");
        let meteors = self.copy_section(layout.meteor_data_offset, layout.max_meteors, sections.meteors, "meteors");
        let targets = self.copy_section(layout.target_data_offset, layout.max_targets, sections.targets, "targets");
        let belts = self.copy_section(layout.belt_data_offset, layout.max_belt_points, sections.belts, "belt points");
        let events = self.copy_section(layout.event_data_offset, layout.max_events, sections.events, "events");

        let h = &mut self.data[..HEADER_FLOATS];
        h[HEADER_FRAME_COUNTER] = header.frame as f32;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h[HEADER_VIEWPORT_WIDTH] = header.viewport.x;
        h[HEADER_VIEWPORT_HEIGHT] = header.viewport.y;
        h[HEADER_VIEWPORT_DPR] = header.dpr;
        h[HEADER_CAMERA_PAN_X] = header.pan.x;
        h[HEADER_CAMERA_PAN_Y] = header.pan.y;
        h[HEADER_CAMERA_ZOOM] = header.zoom;
        h[HEADER_SHIP_X] = header.ship_pos.x;
        h[HEADER_SHIP_Y] = header.ship_pos.y;
        h[HEADER_SHIP_HEADING] = header.ship_heading_deg;
        h[HEADER_SHIP_SCALE] = header.ship_scale;
        h[HEADER_SHIP_ENGINE] = if header.engine_on { 1.0 } else { 0.0 };
        h[HEADER_WARP_PHASE] = header.warp_phase;
        h[HEADER_WARP_THEME] = header.warp_theme as f32;
        h[HEADER_WARP_PROGRESS] = header.warp_progress;
        h[HEADER_WARP_CAUSE] = header.warp_cause;
        h[HEADER_ACTIVE_ROOM] = header.room as f32;
        h[HEADER_HOVERED] = header.hovered.map_or(-1.0, |i| i as f32);
        h[HEADER_STAGE_READY] = if header.stage_ready { 1.0 } else { 0.0 };
        h[HEADER_STAR_COUNT] = stars as f32;
        h[HEADER_METEOR_COUNT] = meteors as f32;
        h[HEADER_TARGET_COUNT] = targets as f32;
        h[HEADER_BELT_POINT_COUNT] = belts as f32;
        h[HEADER_EVENT_COUNT] = events as f32;
        h[HEADER_MAX_STARS] = layout.max_stars as f32;
        h[HEADER_MAX_METEORS] = layout.max_meteors as f32;
        h[HEADER_MAX_TARGETS] = layout.max_targets as f32;
        h[HEADER_MAX_BELT_POINTS] = layout.max_belt_points as f32;
        h[HEADER_MAX_EVENTS] = layout.max_events as f32;
        h[HEADER_STAR_SPEED] = header.star_speed;
        h[HEADER_STAR_MODE] = if header.streaking { 1.0 } else { 0.0 };
    }

    fn copy_section<T: bytemuck::Pod>(&mut self, offset: usize, capacity: usize, items: &[T], name: &str) -> usize {
        let count = items.len().min(capacity);
        if count < items.len() && !self.overflow_reported {
            log::warn!("frame buffer: {} truncated ({} > {})", name, items.len(), capacity);
            self.overflow_reported = true;
        }
        let floats: &[f32] = bytemuck::cast_slice(&items[..count]);
        self.data[offset..offset + floats.len()].copy_from_slice(floats);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EventKind;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&SceneConfig::default());
        assert_eq!(layout.max_stars, 420);
        assert_eq!(layout.max_meteors, 1);
        assert_eq!(layout.max_targets, 16);
        assert_eq!(layout.star_data_floats, 420 * 8);
        assert_eq!(layout.target_data_floats, 16 * 12);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 2, 10, 50, 20);

        assert_eq!(layout.star_data_offset, HEADER_FLOATS);
        assert_eq!(layout.meteor_data_offset, layout.star_data_offset + layout.star_data_floats);
        assert_eq!(layout.target_data_offset, layout.meteor_data_offset + layout.meteor_data_floats);
        assert_eq!(layout.belt_data_offset, layout.target_data_offset + layout.target_data_floats);
        assert_eq!(layout.event_data_offset, layout.belt_data_offset + layout.belt_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);

        let expected = HEADER_FLOATS + 100 * 8 + 2 * 8 + 10 * 12 + 50 * 4 + 20 * 4;
        assert_eq!(layout.buffer_total_floats, expected);
    }

    #[test]
    fn write_places_sections_and_counts() {
        let layout = ProtocolLayout::new(4, 1, 2, 4, 1);
        let mut buf = FrameBuffer::new(layout.clone());
        let star = StarInstance { x: 3.0, alpha: 0.5, ..Default::default() };
        let events = [
            SceneEvent::new(EventKind::Flash, 1.0, 2.0, 0.0),
            SceneEvent::new(EventKind::Engine, 1.0, 0.0, 0.0),
        ];
        let header = FrameHeader { frame: 7, hovered: None, room: 1, ..Default::default() };
        buf.write(&header, &FrameSections {
            stars: &[star, star],
            meteors: &[],
            targets: &[],
            belts: &[],
            events: &events,
        });

        let data = buf.as_slice();
        assert_eq!(data[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(data[HEADER_STAR_COUNT], 2.0);
        assert_eq!(data[HEADER_HOVERED], -1.0);
        assert_eq!(data[HEADER_ACTIVE_ROOM], 1.0);
        assert_eq!(data[layout.star_data_offset], 3.0);
        // Second event dropped: capacity is one.
        assert_eq!(data[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(data[layout.event_data_offset], EventKind::Flash as u32 as f32);
    }
}
