/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::fmt;

pub const MAX_SPATIAL_LAYERS: usize = 5;
pub const MAX_TEMPORAL_STREAMS: usize = 4;

/// Class that describes how video bitrate, in bps, is allocated across temporal
/// and spatial layers. Note that bitrates are NOT cumulative. Depending on if
/// layers are dependent or not, it is up to the user to aggregate.
///
/// For each index, the bitrate can also both set and unset. This is used with a
/// set bps = 0 to signal an explicit "turn off" signal.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VideoBitrateAllocation {
    sum: u32,
    bitrates: [[Option<u32>; MAX_TEMPORAL_STREAMS]; MAX_SPATIAL_LAYERS],
}

impl VideoBitrateAllocation {
    // Two allocations with the same layers enabled whose totals are within this
    // many percent of each other are treated as similar.
    const MAX_SIMILAR_SIZE_DIFFERENCE_PERCENT: u64 = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or overwrites one cell. Returns false, leaving the allocation
    /// untouched, if the indices are out of range or the total would overflow.
    pub fn set_bitrate(&mut self, spatial_index: usize, temporal_index: usize, bitrate_bps: u32) -> bool {
        if spatial_index >= MAX_SPATIAL_LAYERS || temporal_index >= MAX_TEMPORAL_STREAMS {
            return false;
        }

        let previous = self.bitrates[spatial_index][temporal_index].unwrap_or(0);
        let new_sum = self.sum as u64 - previous as u64 + bitrate_bps as u64;
        if new_sum > u32::MAX as u64 {
            return false;
        }

        self.bitrates[spatial_index][temporal_index] = Some(bitrate_bps);
        self.sum = new_sum as u32;
        true
    }

    pub fn has_bitrate(&self, spatial_index: usize, temporal_index: usize) -> bool {
        self.cell(spatial_index, temporal_index).is_some()
    }

    /// Returns 0 for cells that are unset or out of range.
    pub fn get_bitrate(&self, spatial_index: usize, temporal_index: usize) -> u32 {
        self.cell(spatial_index, temporal_index).unwrap_or(0)
    }

    fn cell(&self, spatial_index: usize, temporal_index: usize) -> Option<u32> {
        *self.bitrates.get(spatial_index)?.get(temporal_index)?
    }

    // Whether the specific spatial layers has the bitrate set in any of its
    // temporal layers.
    pub fn is_spatial_layer_used(&self, spatial_index: usize) -> bool {
        match self.bitrates.get(spatial_index) {
            Some(layer) => layer.iter().any(Option::is_some),
            None => false,
        }
    }

    // Get the sum of all the temporal layer for a specific spatial layer.
    pub fn get_spatial_layer_sum(&self, spatial_index: usize) -> u32 {
        self.get_temporal_layer_sum(spatial_index, MAX_TEMPORAL_STREAMS - 1)
    }

    // Sum of bitrates of temporal layers, from layer 0 to `temporal_index`
    // inclusive, of specified spatial layer `spatial_index`. Bitrates of lower
    // spatial layers are not included.
    pub fn get_temporal_layer_sum(&self, spatial_index: usize, temporal_index: usize) -> u32 {
        let Some(layer) = self.bitrates.get(spatial_index) else {
            return 0;
        };
        let last = temporal_index.min(MAX_TEMPORAL_STREAMS - 1);
        layer[..=last].iter().map(|bitrate| bitrate.unwrap_or(0)).sum()
    }

    /// Returns a vector of the temporal layer bitrates for the specific spatial
    /// layer. Length of the returned vector is cropped to the highest temporal
    /// layer with a defined bitrate.
    pub fn get_temporal_layer_allocation(&self, spatial_index: usize) -> Vec<u32> {
        let Some(layer) = self.bitrates.get(spatial_index) else {
            return Vec::new();
        };
        let len = layer
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        layer[..len].iter().map(|bitrate| bitrate.unwrap_or(0)).collect()
    }

    pub fn get_sum_bps(&self) -> u32 {
        self.sum
    }

    // Get the sum of all the bitrates, in kbps, rounding to nearest.
    pub fn get_sum_kbps(&self) -> u32 {
        ((self.sum as u64 + 500) / 1000) as u32
    }

    /// True if exactly the same (spatial, temporal) cells are set in both
    /// allocations, regardless of their values.
    pub fn is_same_layers_enabled(&self, other: &Self) -> bool {
        self.bitrates
            .iter()
            .flatten()
            .zip(other.bitrates.iter().flatten())
            .all(|(lhs, rhs)| lhs.is_some() == rhs.is_some())
    }

    /// Allocations are similar when they are equal, or when they enable the same
    /// layers and their totals differ by less than 10% of the smaller total.
    /// A change in enabled layers is never similar.
    pub fn is_similar_to(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        if !self.is_same_layers_enabled(other) {
            return false;
        }

        let lhs = self.sum as u64;
        let rhs = other.sum as u64;
        let (smaller, larger) = if lhs < rhs { (lhs, rhs) } else { (rhs, lhs) };
        (larger - smaller) * 100 < smaller * Self::MAX_SIMILAR_SIZE_DIFFERENCE_PERCENT
    }
}

impl fmt::Display for VideoBitrateAllocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sum == 0 {
            return write!(f, "VideoBitrateAllocation [ [] ]");
        }

        write!(f, "VideoBitrateAllocation [")?;
        let mut spatial_cumulator = 0;
        for si in 0..MAX_SPATIAL_LAYERS {
            if spatial_cumulator == self.sum {
                break;
            }

            let layer_sum = self.get_spatial_layer_sum(si);
            if layer_sum == self.sum {
                write!(f, " [")?;
            } else {
                if si > 0 {
                    write!(f, ",")?;
                }
                write!(f, "\n  [")?;
            }
            spatial_cumulator += layer_sum;

            let mut temporal_cumulator = 0;
            for ti in 0..MAX_TEMPORAL_STREAMS {
                if temporal_cumulator == layer_sum {
                    break;
                }
                if ti > 0 {
                    write!(f, ", ")?;
                }
                let bitrate = self.get_bitrate(si, ti);
                write!(f, "{}", bitrate)?;
                temporal_cumulator += bitrate;
            }
            write!(f, "]")?;
        }
        write!(f, " ]")
    }
}

impl fmt::Debug for VideoBitrateAllocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Receives per-layer bitrate allocations as the encoder's rate allocator
/// produces them.
pub trait VideoBitrateAllocationObserver {
    fn on_bitrate_allocation_updated(&mut self, allocation: &VideoBitrateAllocation);
}

#[cfg(test)]
mod test {
    use super::*;

    fn four_layer_allocation() -> VideoBitrateAllocation {
        let mut alloc = VideoBitrateAllocation::new();
        alloc.set_bitrate(0, 0, 10000);
        alloc.set_bitrate(0, 1, 20000);
        alloc.set_bitrate(1, 0, 30000);
        alloc.set_bitrate(1, 1, 40000);
        alloc
    }

    #[test]
    fn sum_tracks_every_mutation() {
        let mut alloc = four_layer_allocation();
        assert_eq!(alloc.get_sum_bps(), 100000);
        assert_eq!(alloc.get_sum_kbps(), 100);

        // Overwriting replaces the old contribution to the sum.
        alloc.set_bitrate(1, 1, 15000);
        assert_eq!(alloc.get_sum_bps(), 75000);

        alloc.set_bitrate(0, 0, 0);
        assert_eq!(alloc.get_sum_bps(), 65000);
        assert!(alloc.has_bitrate(0, 0));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut alloc = four_layer_allocation();
        assert!(!alloc.set_bitrate(MAX_SPATIAL_LAYERS, 0, 1000));
        assert!(!alloc.set_bitrate(0, MAX_TEMPORAL_STREAMS, 1000));
        assert_eq!(alloc.get_sum_bps(), 100000);

        assert_eq!(alloc.get_bitrate(MAX_SPATIAL_LAYERS, 0), 0);
        assert_eq!(alloc.get_bitrate(0, MAX_TEMPORAL_STREAMS), 0);
        assert!(!alloc.has_bitrate(7, 7));
        assert!(!alloc.is_spatial_layer_used(MAX_SPATIAL_LAYERS));
        assert!(alloc.get_temporal_layer_allocation(MAX_SPATIAL_LAYERS).is_empty());
    }

    #[test]
    fn overflowing_sum_is_rejected() {
        let mut alloc = VideoBitrateAllocation::new();
        assert!(alloc.set_bitrate(0, 0, u32::MAX));
        assert!(!alloc.set_bitrate(0, 1, 1));
        assert_eq!(alloc.get_sum_bps(), u32::MAX);
        assert!(!alloc.has_bitrate(0, 1));

        // Replacing the existing cell does not double count it.
        assert!(alloc.set_bitrate(0, 0, 5));
        assert_eq!(alloc.get_sum_bps(), 5);
    }

    #[test]
    fn layer_sums() {
        let alloc = four_layer_allocation();
        assert_eq!(alloc.get_spatial_layer_sum(0), 30000);
        assert_eq!(alloc.get_spatial_layer_sum(1), 70000);
        assert_eq!(alloc.get_temporal_layer_sum(1, 0), 30000);
        assert_eq!(alloc.get_temporal_layer_allocation(1), vec![30000, 40000]);
        assert!(alloc.is_spatial_layer_used(1));
        assert!(!alloc.is_spatial_layer_used(2));
    }

    #[test]
    fn temporal_allocation_keeps_gaps() {
        let mut alloc = VideoBitrateAllocation::new();
        alloc.set_bitrate(0, 2, 500);
        assert_eq!(alloc.get_temporal_layer_allocation(0), vec![0, 0, 500]);
    }

    #[test]
    fn equality_is_structural() {
        let a = four_layer_allocation();
        let b = four_layer_allocation();
        let c = four_layer_allocation();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);

        // Unset differs from explicitly zero.
        let mut zeroed = four_layer_allocation();
        zeroed.set_bitrate(3, 0, 0);
        assert_ne!(a, zeroed);
        assert_eq!(a.get_sum_bps(), zeroed.get_sum_bps());
    }

    #[test]
    fn similarity_boundary_is_ten_percent() {
        let alloc = four_layer_allocation();
        let base_layer_min_update_bitrate_bps = alloc.get_bitrate(0, 0) + alloc.get_sum_bps() / 10;

        let mut updated = alloc.clone();
        updated.set_bitrate(0, 0, base_layer_min_update_bitrate_bps - 1);
        assert!(alloc.is_similar_to(&updated));
        assert!(updated.is_similar_to(&alloc));

        updated.set_bitrate(0, 0, base_layer_min_update_bitrate_bps);
        assert!(!alloc.is_similar_to(&updated));
        assert!(!updated.is_similar_to(&alloc));
    }

    #[test]
    fn similarity_is_reflexive() {
        let alloc = four_layer_allocation();
        assert!(alloc.is_similar_to(&alloc));

        let empty = VideoBitrateAllocation::new();
        assert!(empty.is_similar_to(&empty));
    }

    #[test]
    fn layer_change_is_never_similar() {
        let alloc = four_layer_allocation();
        let mut updated = alloc.clone();
        updated.set_bitrate(2, 0, 10000);
        updated.set_bitrate(1, 1, alloc.get_bitrate(1, 1) - 10000);
        assert_eq!(alloc.get_sum_bps(), updated.get_sum_bps());
        assert!(!alloc.is_same_layers_enabled(&updated));
        assert!(!alloc.is_similar_to(&updated));
    }

    #[test]
    fn display_lists_layers() {
        assert_eq!(VideoBitrateAllocation::new().to_string(), "VideoBitrateAllocation [ [] ]");

        let mut single = VideoBitrateAllocation::new();
        single.set_bitrate(0, 0, 1000);
        single.set_bitrate(0, 1, 2000);
        assert_eq!(single.to_string(), "VideoBitrateAllocation [ [1000, 2000] ]");

        assert_eq!(
            four_layer_allocation().to_string(),
            "VideoBitrateAllocation [\n  [10000, 20000],\n  [30000, 40000] ]"
        );
    }
}
