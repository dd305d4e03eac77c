/*
 * Copyright (c):
 * 2024 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of strategy-sim.
 *
 * strategy-sim is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * strategy-sim is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with strategy-sim. If not, see <https://www.gnu.org/licenses/>.
 */

use serde::{Deserialize, Serialize};
use crate::error::{Result, SimulationError};


/// Serialisable description of a track, as found in the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLayout {
    pub segment_lengths: Vec<f64>,
    pub curvature_zones: Vec<f64>,
    pub straight_threshold: f64,
}

impl Default for TrackLayout {
    fn default() -> Self {
        TrackLayout {
            segment_lengths: vec![200.0, 100.0, 200.0, 100.0],
            curvature_zones: vec![1000.0, 31.83, 1000.0, 31.83],
            straight_threshold: 500.0,
        }
    }
}

impl TrackLayout {
    pub fn build(&self) -> Result<Track> {
        Track::new(self.segment_lengths.iter().map(|l| Segment::new(*l)).collect(),
                   self.curvature_zones.clone(),
                   self.straight_threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub length: f64,
}

impl Segment {
    pub fn new(length: f64) -> Segment {
        Segment { length }
    }
}

/// A segment together with where it sits on the track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSegment {
    pub index: usize,
    pub start: f64,
    pub length: f64,
}

impl PlacedSegment {
    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    segments: Vec<Segment>,
    curvature_zones: Vec<f64>,
    straight_threshold: f64,
    total_length: f64,
}

impl Track {
    pub fn new(segments: Vec<Segment>, curvature_zones: Vec<f64>, straight_threshold: f64) -> Result<Track> {
        if segments.is_empty() {
            return Err(SimulationError::InvalidTrack("track has no segments".to_string()));
        }
        if let Some((idx, seg)) = segments.iter().enumerate().find(|(_, s)| !(s.length.is_finite() && s.length > 0.0)) {
            return Err(SimulationError::InvalidTrack(
                format!("segment {} has invalid length {}", idx, seg.length)
            ));
        }
        if curvature_zones.is_empty() {
            return Err(SimulationError::InvalidTrack("track has no curvature zones".to_string()));
        }
        if curvature_zones.iter().any(|c| c.is_nan()) {
            return Err(SimulationError::InvalidTrack("curvature zone is NaN".to_string()));
        }
        if !(straight_threshold >= 0.0) {
            return Err(SimulationError::InvalidTrack(
                format!("straight threshold must be non-negative. Got {}", straight_threshold)
            ));
        }
        let total_length = segments.iter().map(|s| s.length).sum();
        Ok(Track { segments, curvature_zones, straight_threshold, total_length })
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn zone_count(&self) -> usize {
        self.curvature_zones.len()
    }

    pub fn straight_threshold(&self) -> f64 {
        self.straight_threshold
    }

    pub fn placed_segments(&self) -> Vec<PlacedSegment> {
        let mut start = 0.0;
        self.segments.iter().enumerate().map(|(index, seg)| {
            let placed = PlacedSegment { index, start, length: seg.length };
            start += seg.length;
            placed
        }).collect()
    }

    /// Curvature to apply at `position`. Zones whose magnitude exceeds the
    /// straight threshold count as straight and resolve to 0.
    pub fn curvature_at(&self, position: f64) -> f64 {
        let zone = resolve_zone(position, self.total_length, self.curvature_zones.len());
        let curvature = self.curvature_zones[zone];
        if curvature.abs() > self.straight_threshold {
            return 0.0;
        }
        curvature
    }
}

/// Index of the equal-width zone containing `position`.
///
/// Zones split `[0, total_length]` into `zone_count` equal parts. Positions at
/// or past the end of the track resolve to the last zone and positions before
/// the start resolve to the first.
pub fn resolve_zone(position: f64, total_length: f64, zone_count: usize) -> usize {
    if zone_count == 0 || !(total_length > 0.0) || !(position > 0.0) {
        return 0;
    }
    let raw = (position / total_length * zone_count as f64).floor();
    if raw >= zone_count as f64 {
        return zone_count - 1;
    }
    raw as usize
}
