use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timestamped look-at pose on an animation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Ordered, time-indexed sequence of keyframes describing a camera/object
/// animation. Frames are kept sorted by time; every mutation that can move a
/// frame reports the frame's resulting index so callers can keep a selection
/// pointed at the same keyframe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationPath {
    name: String,
    repeat: bool,
    frames: Vec<Keyframe>,
}

impl AnimationPath {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), repeat: false, frames: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn repeat_on(&self) -> bool {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn key_frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Panics if `index` is out of bounds; callers guard on `key_frame_count`.
    pub fn key_frame(&self, index: usize) -> &Keyframe {
        &self.frames[index]
    }

    pub fn key_frames(&self) -> &[Keyframe] {
        &self.frames
    }

    /// Inserts a keyframe keeping the sequence sorted by time and returns the
    /// index it landed at. A frame sharing a time with existing frames lands
    /// after them.
    pub fn add_key_frame(&mut self, time: f32, position: Vec3, target: Vec3, up: Vec3) -> usize {
        let index = self.frames.partition_point(|frame| frame.time <= time);
        self.frames.insert(index, Keyframe { time, position, target, up });
        index
    }

    pub fn remove_key_frame(&mut self, index: usize) {
        self.frames.remove(index);
    }

    pub fn set_frame_position(&mut self, index: usize, position: Vec3) {
        self.frames[index].position = position;
    }

    pub fn set_frame_target(&mut self, index: usize, target: Vec3) {
        self.frames[index].target = target;
    }

    pub fn set_frame_up(&mut self, index: usize, up: Vec3) {
        self.frames[index].up = up;
    }

    /// Re-times a frame, re-sorting the sequence, and returns the frame's
    /// resulting index.
    pub fn set_frame_time(&mut self, index: usize, time: f32) -> usize {
        let frame = self.frames.remove(index);
        self.add_key_frame(time, frame.position, frame.target, frame.up)
    }

    /// Time span covered by the keyframes.
    pub fn duration(&self) -> f32 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Linearly interpolated pose at `time`. With repeat on, time wraps over
    /// the path duration; otherwise it clamps to the end frames. Returns
    /// `None` for an empty path.
    pub fn sample(&self, time: f32) -> Option<Keyframe> {
        let first = *self.frames.first()?;
        let last = *self.frames.last()?;
        let duration = last.time - first.time;
        let t = if self.repeat && duration > f32::EPSILON {
            first.time + (time - first.time).rem_euclid(duration)
        } else {
            time.clamp(first.time, last.time)
        };
        let next = self.frames.partition_point(|frame| frame.time < t);
        if next == 0 {
            return Some(Keyframe { time: t, ..first });
        }
        if next == self.frames.len() {
            return Some(Keyframe { time: t, ..last });
        }
        let a = self.frames[next - 1];
        let b = self.frames[next];
        let span = b.time - a.time;
        let alpha = if span <= f32::EPSILON { 0.0 } else { (t - a.time) / span };
        Some(Keyframe {
            time: t,
            position: a.position.lerp(b.position, alpha),
            target: a.target.lerp(b.target, alpha),
            up: a.up.lerp(b.up, alpha).normalize_or_zero(),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .with_context(|| format!("Failed to serialize path '{}'", self.name))?;
        fs::write(path, json).with_context(|| format!("Failed to write path file {}", path.display()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Failed to read path file {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse path file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(time: f32, x: f32) -> (f32, Vec3, Vec3, Vec3) {
        (time, Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.0, 1.0), Vec3::Y)
    }

    #[test]
    fn add_key_frame_keeps_time_order_and_reports_index() {
        let mut path = AnimationPath::new("test");
        let (t, p, tg, up) = frame_at(2.0, 2.0);
        assert_eq!(path.add_key_frame(t, p, tg, up), 0);
        let (t, p, tg, up) = frame_at(0.5, 0.5);
        assert_eq!(path.add_key_frame(t, p, tg, up), 0);
        let (t, p, tg, up) = frame_at(1.0, 1.0);
        assert_eq!(path.add_key_frame(t, p, tg, up), 1);
        let times: Vec<f32> = path.key_frames().iter().map(|f| f.time).collect();
        assert_eq!(times, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn duplicate_time_lands_after_existing_frames() {
        let mut path = AnimationPath::new("test");
        path.add_key_frame(1.0, Vec3::ZERO, Vec3::Z, Vec3::Y);
        let index = path.add_key_frame(1.0, Vec3::ONE, Vec3::Z, Vec3::Y);
        assert_eq!(index, 1);
        assert_eq!(path.key_frame(1).position, Vec3::ONE);
    }

    #[test]
    fn set_frame_time_moves_frame_and_returns_new_index() {
        let mut path = AnimationPath::new("test");
        for (time, x) in [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)] {
            let (t, p, tg, up) = frame_at(time, x);
            path.add_key_frame(t, p, tg, up);
        }
        let new_index = path.set_frame_time(0, 5.0);
        assert_eq!(new_index, 2);
        assert_eq!(path.key_frame(2).position.x, 0.0);
        assert_eq!(path.key_frame(2).time, 5.0);
    }

    #[test]
    fn sample_blends_between_bracketing_frames() {
        let mut path = AnimationPath::new("test");
        path.add_key_frame(0.0, Vec3::ZERO, Vec3::Z, Vec3::Y);
        path.add_key_frame(2.0, Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 1.0), Vec3::Y);
        let mid = path.sample(1.0).unwrap();
        assert!((mid.position.x - 2.0).abs() < 1e-5);
        assert!((mid.target.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn sample_clamps_without_repeat_and_wraps_with_repeat() {
        let mut path = AnimationPath::new("test");
        path.add_key_frame(0.0, Vec3::ZERO, Vec3::Z, Vec3::Y);
        path.add_key_frame(2.0, Vec3::new(4.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 1.0), Vec3::Y);
        let clamped = path.sample(10.0).unwrap();
        assert!((clamped.position.x - 4.0).abs() < 1e-5);
        path.set_repeat(true);
        let wrapped = path.sample(2.5).unwrap();
        assert!((wrapped.position.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sample_on_empty_path_is_none() {
        assert!(AnimationPath::new("empty").sample(0.0).is_none());
    }

    #[test]
    fn single_frame_path_samples_that_frame() {
        let mut path = AnimationPath::new("test");
        path.add_key_frame(1.0, Vec3::ONE, Vec3::Z, Vec3::Y);
        let sampled = path.sample(7.0).unwrap();
        assert_eq!(sampled.position, Vec3::ONE);
    }
}
