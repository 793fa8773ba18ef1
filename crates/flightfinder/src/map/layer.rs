//! Grouping of visible experiences into map markers.

use std::collections::HashMap;

use tracing::trace;

use super::{Bounds, MapSurface, MarkerHandle, MarkerIcon, Popup, PopupItem};
use crate::experience::{Coordinate, ExperienceId, ExperienceRecord};

/// Identity of a marker group: the bit pattern of its coordinate.
///
/// Records share a marker only when their latitude and longitude are
/// identical, not merely close. Negative zero counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    lat_bits: u64,
    lng_bits: u64,
}

impl From<Coordinate> for GroupKey {
    fn from(at: Coordinate) -> Self {
        Self {
            lat_bits: canonical_bits(at.lat),
            lng_bits: canonical_bits(at.lng),
        }
    }
}

// -0.0 + 0.0 is +0.0, so both zeros hash alike.
fn canonical_bits(degrees: f64) -> u64 {
    (degrees + 0.0).to_bits()
}

/// Experiences sharing one coordinate, drawn as a single marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    coordinate: Coordinate,
    items: Vec<PopupItem>,
    handle: Option<MarkerHandle>,
}

impl MarkerGroup {
    /// Where the marker sits.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Ids of the grouped experiences, in visible order.
    pub fn member_ids(&self) -> impl Iterator<Item = ExperienceId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    /// Number of grouped experiences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the group is empty. Groups built from records never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The marker icon for this group.
    #[must_use]
    pub fn icon(&self) -> MarkerIcon {
        MarkerIcon::Group {
            count: self.items.len(),
        }
    }

    /// The popup listing every grouped experience.
    #[must_use]
    pub fn popup(&self) -> Popup {
        Popup::Group {
            items: self.items.clone(),
        }
    }

    /// The surface handle, once the group has been placed.
    #[must_use]
    pub fn handle(&self) -> Option<MarkerHandle> {
        self.handle
    }
}

/// The non-home markers for one visible subset.
///
/// Groups appear in first-seen order of the subset. Every member id maps to
/// its group, so any visible record resolves to its marker.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    groups: Vec<MarkerGroup>,
    by_key: HashMap<GroupKey, usize>,
    by_id: HashMap<ExperienceId, GroupKey>,
}

impl MarkerLayer {
    /// Group an ordered subset by coordinate.
    #[must_use]
    pub fn group(subset: &[&ExperienceRecord]) -> Self {
        let mut layer = Self::default();
        for record in subset {
            let key = GroupKey::from(record.coordinates);
            let index = *layer.by_key.entry(key).or_insert_with(|| {
                layer.groups.push(MarkerGroup {
                    coordinate: record.coordinates,
                    items: Vec::new(),
                    handle: None,
                });
                layer.groups.len() - 1
            });
            layer.groups[index].items.push(PopupItem {
                id: record.id,
                name: record.name.clone(),
                price: record.price,
                duration: record.duration,
            });
            layer.by_id.insert(record.id, key);
        }
        layer
    }

    /// All groups, in first-seen order.
    #[must_use]
    pub fn groups(&self) -> &[MarkerGroup] {
        &self.groups
    }

    /// Check if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group containing a record.
    #[must_use]
    pub fn group_of(&self, id: ExperienceId) -> Option<&MarkerGroup> {
        let key = self.by_id.get(&id)?;
        self.by_key.get(key).map(|&index| &self.groups[index])
    }

    /// The placed marker for a record.
    #[must_use]
    pub fn handle_of(&self, id: ExperienceId) -> Option<MarkerHandle> {
        self.group_of(id).and_then(MarkerGroup::handle)
    }

    /// Handles of every placed marker.
    pub fn handles(&self) -> impl Iterator<Item = MarkerHandle> + '_ {
        self.groups.iter().filter_map(MarkerGroup::handle)
    }

    /// Bounds covering every group plus `home`.
    ///
    /// Returns `None` when there are no groups, so an empty subset never
    /// moves the view.
    #[must_use]
    pub fn bounds(&self, home: Option<Coordinate>) -> Option<Bounds> {
        let bounds = Bounds::covering(self.groups.iter().map(|group| group.coordinate))?;
        Some(match home {
            Some(home) => bounds.extended(home),
            None => bounds,
        })
    }

    /// Place every group on the surface.
    pub fn attach<M: MapSurface + ?Sized>(&mut self, map: &mut M) {
        for group in &mut self.groups {
            let handle = map.add_marker(group.coordinate, group.icon(), group.popup());
            trace!(marker = %handle, members = group.items.len(), "Placed marker");
            group.handle = Some(handle);
        }
    }

    /// Remove every placed group from the surface.
    pub fn detach<M: MapSurface + ?Sized>(&mut self, map: &mut M) {
        for group in &mut self.groups {
            if let Some(handle) = group.handle.take() {
                trace!(marker = %handle, "Removed marker");
                map.remove_marker(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;
    use crate::filter::{derive, FilterState};
    use crate::map::HeadlessMap;

    fn visible_layer() -> MarkerLayer {
        let dataset = fixtures::catalog();
        let filters = FilterState {
            show_over_budget: true,
            ..FilterState::default()
        };
        MarkerLayer::group(&derive(&dataset, &filters))
    }

    #[test]
    fn test_shared_coordinates_form_one_group() {
        let layer = visible_layer();
        // Price order: 2, 6, 1, 4, 3, 5. 2 and 6 share Goodwood, 1 and 3 Shoreham.
        assert_eq!(layer.groups().len(), 4);

        let goodwood = &layer.groups()[0];
        assert_eq!(goodwood.coordinate(), fixtures::GOODWOOD);
        assert_eq!(goodwood.member_ids().collect::<Vec<_>>(), vec![2, 6]);
        assert_eq!(goodwood.icon(), MarkerIcon::Group { count: 2 });
        assert_eq!(goodwood.icon().label(), "2");

        let shoreham = &layer.groups()[1];
        assert_eq!(shoreham.member_ids().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_signed_zero_coordinates_share_a_group() {
        let dataset = fixtures::catalog();
        let mut positive = dataset.experience(1).unwrap().clone();
        positive.coordinates = Coordinate::new(0.0, 0.0);
        let mut negative = dataset.experience(2).unwrap().clone();
        negative.coordinates = Coordinate::new(-0.0, 0.0);

        let layer = MarkerLayer::group(&[&positive, &negative]);
        assert_eq!(layer.groups().len(), 1);
        assert_eq!(layer.group_of(2).unwrap().len(), 2);
    }

    #[test]
    fn test_popup_lists_all_members() {
        let layer = visible_layer();
        let Popup::Group { items } = layer.group_of(6).unwrap().popup() else {
            panic!("expected a group popup");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 2);
        assert_eq!(items[0].price, 99);
        assert_eq!(items[1].id, 6);
        assert_eq!(items[1].duration, 60);
    }

    #[test]
    fn test_single_member_uses_plane_glyph() {
        let layer = visible_layer();
        let group = layer.group_of(5).unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group.icon().label(), "✈");
    }

    #[test]
    fn test_every_member_resolves_to_its_group() {
        let layer = visible_layer();
        for id in 1..=6 {
            let group = layer.group_of(id).unwrap();
            assert!(group.member_ids().any(|member| member == id));
        }
        assert!(layer.group_of(99).is_none());
    }

    #[test]
    fn test_bounds_include_home() {
        let layer = visible_layer();
        let bounds = layer.bounds(Some(fixtures::HOME)).unwrap();
        assert!(bounds.contains(fixtures::HOME));
        for group in layer.groups() {
            assert!(bounds.contains(group.coordinate()));
        }
        assert!((bounds.north - 51.8).abs() < f64::EPSILON);
        assert!((bounds.east - fixtures::HOME.lng).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_layer_has_no_bounds() {
        let layer = MarkerLayer::group(&[]);
        assert!(layer.is_empty());
        assert!(layer.bounds(Some(fixtures::HOME)).is_none());
    }

    #[test]
    fn test_attach_and_detach() {
        let mut map = HeadlessMap::new();
        let mut layer = visible_layer();
        assert!(layer.handle_of(1).is_none());

        layer.attach(&mut map);
        assert_eq!(map.markers().len(), 4);
        assert_eq!(layer.handle_of(1), layer.handle_of(3));
        assert_ne!(layer.handle_of(1), layer.handle_of(2));
        assert_eq!(layer.handles().count(), 4);

        layer.detach(&mut map);
        assert!(map.markers().is_empty());
        assert_eq!(layer.handles().count(), 0);
    }
}
