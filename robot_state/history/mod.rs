//! Time-indexed pose history
//!
//! Stores timestamped odometry poses for a bounded duration so that a
//! delayed measurement can be matched against the pose the robot had when
//! the measurement was taken. Lookups between two samples interpolate along
//! the twist joining them.

use crate::geometry::Pose2D;
use std::collections::VecDeque;

/// Default retention window in seconds
pub const DEFAULT_RETENTION_SECS: f64 = 2.0;

/// Duration-bounded buffer of timestamped poses, ordered oldest to newest
#[derive(Debug, Clone)]
pub struct PoseHistory {
    /// (timestamp in seconds, pose), sorted by timestamp
    samples: VecDeque<(f64, Pose2D)>,
    /// Maximum age of retained samples relative to the newest one
    retention_window: f64,
}

impl Default for PoseHistory {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION_SECS)
    }
}

impl PoseHistory {
    /// Create an empty history keeping `retention_window` seconds of samples
    pub fn new(retention_window: f64) -> Self {
        Self {
            samples: VecDeque::new(),
            retention_window,
        }
    }

    /// Retention window in seconds
    pub fn retention_window(&self) -> f64 {
        self.retention_window
    }

    /// Get the number of samples in the buffer
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clear all samples from the buffer
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record a pose at `timestamp`
    ///
    /// Samples normally arrive in time order and are appended. A late sample
    /// is placed at its sorted position and a repeated timestamp overwrites
    /// the stored pose. Samples older than the retention window, measured
    /// from the newest sample, are evicted afterwards. A non-finite timestamp
    /// cannot be ordered and is ignored.
    pub fn insert(&mut self, timestamp: f64, pose: Pose2D) {
        if !timestamp.is_finite() {
            log::warn!("Ignoring pose sample with non-finite timestamp {timestamp}");
            return;
        }

        match self.samples.back() {
            Some(&(newest, _)) if timestamp < newest => {
                let index = self.samples.partition_point(|(ts, _)| *ts < timestamp);
                match self.samples.get_mut(index) {
                    Some(entry) if entry.0 == timestamp => entry.1 = pose,
                    _ => self.samples.insert(index, (timestamp, pose)),
                }
            }
            Some(&(newest, _)) if timestamp == newest => {
                if let Some(entry) = self.samples.back_mut() {
                    entry.1 = pose;
                }
            }
            _ => self.samples.push_back((timestamp, pose)),
        }

        self.evict();
    }

    fn evict(&mut self) {
        let Some(newest) = self.newest_timestamp() else {
            return;
        };
        let cutoff = newest - self.retention_window;
        while let Some(&(oldest, _)) = self.samples.front() {
            if oldest < cutoff {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Timestamp of the newest sample
    pub fn newest_timestamp(&self) -> Option<f64> {
        self.samples.back().map(|(ts, _)| *ts)
    }

    /// Timestamp of the oldest retained sample
    pub fn oldest_timestamp(&self) -> Option<f64> {
        self.samples.front().map(|(ts, _)| *ts)
    }

    /// Get the time range covered by the buffer
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((self.oldest_timestamp()?, self.newest_timestamp()?))
    }

    /// Newest sample and its timestamp
    pub fn latest(&self) -> Option<(f64, Pose2D)> {
        self.samples.back().copied()
    }

    /// Pose at `timestamp`
    ///
    /// Returns None if the buffer is empty or the timestamp predates the
    /// oldest retained sample. Timestamps after the newest sample return the
    /// newest pose (no extrapolation).
    pub fn sample_at(&self, timestamp: f64) -> Option<Pose2D> {
        let &(oldest, oldest_pose) = self.samples.front()?;
        let &(newest, newest_pose) = self.samples.back()?;

        if timestamp.is_nan() || timestamp < oldest {
            return None;
        }
        if timestamp == oldest {
            return Some(oldest_pose);
        }
        if timestamp >= newest {
            return Some(newest_pose);
        }

        // First sample strictly after the timestamp
        let index = self.samples.partition_point(|(ts, _)| *ts <= timestamp);
        let (before_ts, before) = *self.samples.get(index.checked_sub(1)?)?;
        let (after_ts, after) = *self.samples.get(index)?;

        if before_ts == timestamp {
            return Some(before);
        }
        let t = (timestamp - before_ts) / (after_ts - before_ts);
        Some(before.interpolate(&after, t))
    }

    /// Iterate over (timestamp, pose) from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &(f64, Pose2D)> {
        self.samples.iter()
    }
}
