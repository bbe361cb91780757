//! Device mapper
//!
//! Turns the accepted device list into indexed, typed records: per-type
//! `TypedIndex` by ascending id, the global slot extent, array-bound
//! constants and the list of unoccupied slots.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::catalog::{MechType, SizeConstant};
use crate::validate::RawDevice;

/// A validated device with its target-side placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedDevice {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type_key")]
    pub mech_type: MechType,
    pub raw_type: String,
    pub tia_type: &'static str,
    pub array_name: &'static str,
    /// Zero-based rank within the type group, ordered by id.
    pub typed_index: u32,
    pub has_simulator: bool,
    /// Empty when the type has no simulator.
    pub sim_state_type: &'static str,
    /// Empty when the type has no simulator.
    pub sim_config_type: &'static str,
}

impl MappedDevice {
    fn new(raw: &RawDevice, typed_index: u32) -> Self {
        let info = raw.mech_type.info();
        let (sim_state_type, sim_config_type) = info
            .simulator
            .map(|s| (s.state_udt, s.config_udt))
            .unwrap_or(("", ""));
        Self {
            id: raw.id,
            name: raw.name.clone(),
            mech_type: raw.mech_type,
            raw_type: raw.raw_type.clone(),
            tia_type: info.tia_type,
            array_name: info.array_name,
            typed_index,
            has_simulator: info.simulator.is_some(),
            sim_state_type,
            sim_config_type,
        }
    }
}

/// Everything the renderers need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapResult {
    /// Mapped devices in input order.
    pub devices: Vec<MappedDevice>,
    /// Highest occupied slot, 0 when there are no devices.
    pub extent: u32,
    /// Array upper bounds. Always holds every [`SizeConstant`].
    pub counts: BTreeMap<SizeConstant, u32>,
    /// Unoccupied slots in `0..=extent`, ascending.
    pub gap_slots: Vec<u32>,
    /// Present types only, each group sorted by id.
    pub by_type: BTreeMap<MechType, Vec<MappedDevice>>,
}

impl MapResult {
    /// Value of a size constant (0 if absent).
    pub fn count(&self, constant: SizeConstant) -> u32 {
        self.counts.get(&constant).copied().unwrap_or(0)
    }

    /// Devices of one type sorted by id; empty if the type is absent.
    pub fn group(&self, mech_type: MechType) -> &[MappedDevice] {
        self.by_type
            .get(&mech_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Devices sorted by id.
    pub fn devices_by_id(&self) -> Vec<&MappedDevice> {
        let mut sorted: Vec<&MappedDevice> = self.devices.iter().collect();
        sorted.sort_by_key(|d| d.id);
        sorted
    }
}

/// Map accepted devices.
///
/// Total over any validator output; an empty list maps to extent 0, all
/// counts 0 and no gaps.
pub fn map_devices(raw_devices: &[RawDevice]) -> MapResult {
    // Pass 1: group by type, sort each group by id.
    let mut groups: BTreeMap<MechType, Vec<&RawDevice>> = BTreeMap::new();
    for dev in raw_devices {
        groups.entry(dev.mech_type).or_default().push(dev);
    }
    for group in groups.values_mut() {
        group.sort_by_key(|d| d.id);
    }

    // Pass 2: rank within group.
    let by_type: BTreeMap<MechType, Vec<MappedDevice>> = groups
        .iter()
        .map(|(&t, group)| {
            let mapped = group
                .iter()
                .zip(0u32..)
                .map(|(dev, idx)| MappedDevice::new(dev, idx))
                .collect();
            (t, mapped)
        })
        .collect();

    let typed_index: BTreeMap<u32, u32> = by_type
        .values()
        .flatten()
        .map(|d| (d.id, d.typed_index))
        .collect();

    let devices: Vec<MappedDevice> = raw_devices
        .iter()
        .map(|dev| MappedDevice::new(dev, typed_index.get(&dev.id).copied().unwrap_or(0)))
        .collect();

    let extent = devices.iter().map(|d| d.id).max().unwrap_or(0);

    let gap_slots = if devices.is_empty() {
        Vec::new()
    } else {
        let occupied: BTreeSet<u32> = devices.iter().map(|d| d.id).collect();
        (0..=extent).filter(|slot| !occupied.contains(slot)).collect()
    };

    let mut counts = BTreeMap::new();
    counts.insert(SizeConstant::MechsCount, extent);
    for t in MechType::ALL {
        let upper = groups
            .get(&t)
            .map(|g| u32::try_from(g.len()).unwrap_or(u32::MAX).saturating_sub(1))
            .unwrap_or(0);
        counts.insert(t.count_constant(), upper);
    }

    tracing::debug!(
        devices = devices.len(),
        extent,
        gaps = gap_slots.len(),
        "mapped devices"
    );

    MapResult {
        devices,
        extent,
        counts,
        gap_slots,
        by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(id: u32, name: &str, mech_type: MechType) -> RawDevice {
        RawDevice {
            id,
            name: name.to_string(),
            mech_type,
            raw_type: mech_type.key().to_string(),
        }
    }

    fn by_id(r: &MapResult, id: u32) -> &MappedDevice {
        r.devices.iter().find(|d| d.id == id).unwrap()
    }

    #[test]
    fn empty_input() {
        let r = map_devices(&[]);
        assert_eq!(r.extent, 0);
        assert!(r.devices.is_empty());
        assert!(r.gap_slots.is_empty());
        assert!(r.by_type.is_empty());
        for c in SizeConstant::ALL {
            assert_eq!(r.counts.get(&c), Some(&0), "{c}");
        }
    }

    #[test]
    fn typed_index_follows_id_not_input_order() {
        let r = map_devices(&[
            dev(2, "Noria 2", MechType::Noria),
            dev(1, "Noria", MechType::Noria),
            dev(3, "Redler", MechType::Redler),
        ]);
        assert_eq!(by_id(&r, 1).typed_index, 0);
        assert_eq!(by_id(&r, 2).typed_index, 1);
        assert_eq!(by_id(&r, 3).typed_index, 0);
    }

    #[test]
    fn devices_keep_input_order() {
        let r = map_devices(&[dev(9, "a", MechType::Fan), dev(4, "b", MechType::Fan)]);
        let ids: Vec<u32> = r.devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![9, 4]);
        let sorted: Vec<u32> = r.devices_by_id().iter().map(|d| d.id).collect();
        assert_eq!(sorted, vec![4, 9]);
    }

    #[test]
    fn typed_index_is_dense_per_group() {
        let r = map_devices(&[
            dev(40, "", MechType::Gate2P),
            dev(7, "", MechType::Gate2P),
            dev(12, "", MechType::Gate2P),
            dev(3, "", MechType::Gate2P),
        ]);
        let group = r.group(MechType::Gate2P);
        let ids: Vec<u32> = group.iter().map(|d| d.id).collect();
        let idx: Vec<u32> = group.iter().map(|d| d.typed_index).collect();
        assert_eq!(ids, vec![3, 7, 12, 40]);
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn extent_and_gaps() {
        let r = map_devices(&[dev(1, "Noria", MechType::Noria), dev(5, "Fan", MechType::Fan)]);
        assert_eq!(r.extent, 5);
        assert_eq!(r.gap_slots, vec![0, 2, 3, 4]);
        assert_eq!(r.count(SizeConstant::MechsCount), 5);
    }

    #[test]
    fn single_device_at_slot_zero_has_no_gaps() {
        let r = map_devices(&[dev(0, "Fan", MechType::Fan)]);
        assert_eq!(r.extent, 0);
        assert!(r.gap_slots.is_empty());
    }

    #[test]
    fn counts_use_upper_bound_convention() {
        let r = map_devices(&[
            dev(1, "Noria", MechType::Noria),
            dev(2, "Noria 2", MechType::Noria),
            dev(3, "Redler", MechType::Redler),
            dev(5, "Fan", MechType::Fan),
        ]);
        assert_eq!(r.count(SizeConstant::MechsCount), 5);
        assert_eq!(r.count(SizeConstant::NoriasCount), 1);
        assert_eq!(r.count(SizeConstant::RedlersCount), 0);
        assert_eq!(r.count(SizeConstant::FansCount), 0);
        assert_eq!(r.count(SizeConstant::Gates2pCount), 0);
        assert_eq!(r.counts.len(), SizeConstant::ALL.len());
        assert_eq!(r.gap_slots, vec![0, 4]);
        assert_eq!(by_id(&r, 1).typed_index, 0);
        assert_eq!(by_id(&r, 2).typed_index, 1);
        assert_eq!(by_id(&r, 3).typed_index, 0);
        assert_eq!(by_id(&r, 5).typed_index, 0);
    }

    #[test]
    fn derived_fields_come_from_catalog() {
        let r = map_devices(&[dev(1, "G", MechType::Gate2P), dev(2, "N", MechType::Noria)]);
        let gate = by_id(&r, 1);
        assert_eq!(gate.tia_type, "TYPE_GATE2P");
        assert_eq!(gate.array_name, "Gate2P");
        assert!(!gate.has_simulator);
        assert_eq!(gate.sim_state_type, "");
        assert_eq!(gate.sim_config_type, "");

        let noria = by_id(&r, 2);
        assert!(noria.has_simulator);
        assert_eq!(noria.sim_state_type, "UDT_SimNoriaState");
        assert_eq!(noria.sim_config_type, "UDT_SimNoriaConfig");
    }

    #[test]
    fn absent_types_have_no_group() {
        let r = map_devices(&[dev(1, "N", MechType::Noria)]);
        assert_eq!(r.by_type.len(), 1);
        assert!(r.group(MechType::Fan).is_empty());
    }

    #[test]
    fn mapping_is_order_independent() {
        let a = map_devices(&[
            dev(1, "a", MechType::Noria),
            dev(6, "b", MechType::Redler),
            dev(2, "c", MechType::Noria),
        ]);
        let b = map_devices(&[
            dev(2, "c", MechType::Noria),
            dev(1, "a", MechType::Noria),
            dev(6, "b", MechType::Redler),
        ]);
        assert_eq!(a.by_type, b.by_type);
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.gap_slots, b.gap_slots);
    }
}
