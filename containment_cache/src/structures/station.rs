/*!
Stations, channels, and assignments of channels to stations.

A station is an opaque identifier, and a channel is what is assigned to a station.
An [Assignment] is stored station-major, as this is the form in which an assignment is restricted to some collection of stations.
The channel-major form used by some solvers is available through [by_channel] and [from_by_channel].

```rust
# use containment_cache::structures::station::{by_channel, from_by_channel, Assignment};
let assignment = Assignment::from([(1, 14), (2, 15), (3, 14)]);

let channels = by_channel(&assignment);
assert_eq!(channels[&14].len(), 2);

assert_eq!(from_by_channel(&channels), assignment);
```
*/

use std::collections::{BTreeMap, BTreeSet};

/// A station, identified by an integer.
pub type Station = u32;

/// A channel.
pub type Channel = u16;

/// A (partial) map from stations to channels.
pub type Assignment = BTreeMap<Station, Channel>;

/// The channel-major form of an assignment.
pub fn by_channel(assignment: &Assignment) -> BTreeMap<Channel, BTreeSet<Station>> {
    let mut channels: BTreeMap<Channel, BTreeSet<Station>> = BTreeMap::new();
    for (station, channel) in assignment {
        channels.entry(*channel).or_default().insert(*station);
    }
    channels
}

/// The station-major form of an assignment given channel-major.
///
/// If a station appears on several channels, the highest channel is kept.
pub fn from_by_channel(channels: &BTreeMap<Channel, BTreeSet<Station>>) -> Assignment {
    channels
        .iter()
        .flat_map(|(channel, stations)| stations.iter().map(move |station| (*station, *channel)))
        .collect()
}
