// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::dataset::DataSet;
use super::entity::{Group, LatLon, Line, Member, Point};
use super::ids::{GroupId, LineId, PointId};
use super::tags::Tags;

pub(crate) fn pid(value: i64) -> PointId {
    PointId::new(value).expect("point id")
}

pub(crate) fn lid(value: i64) -> LineId {
    LineId::new(value).expect("line id")
}

pub(crate) fn gid(value: i64) -> GroupId {
    GroupId::new(value).expect("group id")
}

pub(crate) fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn point(id: i64, lat: f64, lon: f64) -> Point {
    Point::new(pid(id), LatLon::new(lat, lon))
}

/// Point 1 sits in the middle of line 10 and at the end of lines 11 and 12.
///
/// ```text
///        4
///        |  (11)
///  2 --- 1 --- 3   (10)
///        |  (12)
///        5
/// ```
pub(crate) fn crossroads() -> DataSet {
    let mut data_set = DataSet::new();
    data_set.insert_point(point(1, 0.0, 0.0).with_tags(tags(&[("highway", "traffic_signals")])));
    data_set.insert_point(point(2, 0.0, -1.0));
    data_set.insert_point(point(3, 0.0, 1.0));
    data_set.insert_point(point(4, 1.0, 0.0));
    data_set.insert_point(point(5, -1.0, 0.0));

    data_set.insert_line(Line::new(lid(10), vec![pid(2), pid(1), pid(3)]));
    data_set.insert_line(Line::new(lid(11), vec![pid(4), pid(1)]));
    data_set.insert_line(Line::new(lid(12), vec![pid(1), pid(5)]));
    data_set
}

/// Two lines that only meet at their endpoints in point 1.
pub(crate) fn corner() -> DataSet {
    let mut data_set = DataSet::new();
    data_set.insert_point(point(1, 0.0, 0.0));
    data_set.insert_point(point(2, 0.0, 1.0));
    data_set.insert_point(point(3, 1.0, 0.0));

    data_set.insert_line(Line::new(lid(20), vec![pid(1), pid(2)]));
    data_set.insert_line(Line::new(lid(21), vec![pid(3), pid(1)]));
    data_set
}

/// A figure-eight: line 30 passes through point 1 three times.
pub(crate) fn figure_eight() -> DataSet {
    let mut data_set = DataSet::new();
    for (id, lat, lon) in [(1, 0.0, 0.0), (2, 1.0, 1.0), (3, 1.0, -1.0), (4, -1.0, 1.0), (5, -1.0, -1.0)] {
        data_set.insert_point(point(id, lat, lon));
    }
    data_set.insert_line(Line::new(
        lid(30),
        vec![pid(2), pid(1), pid(3), pid(4), pid(1), pid(5), pid(1)],
    ));
    data_set
}

/// A tagged bus stop on a single street, member of a route.
pub(crate) fn bus_stop() -> DataSet {
    let mut data_set = DataSet::new();
    data_set.insert_point(point(1, 0.0, 0.0).with_tags(tags(&[("highway", "bus_stop"), ("name", "Main St")])));
    data_set.insert_point(point(2, 0.0, -1.0));
    data_set.insert_point(point(3, 0.0, 1.0));
    data_set.insert_line(Line::new(lid(40), vec![pid(2), pid(1), pid(3)]));
    data_set.insert_group(
        Group::new(gid(400), vec![Member::new("stop", pid(1)), Member::new("", lid(40))])
            .with_tags(tags(&[("type", "route"), ("name", "Bus 7")])),
    );
    data_set
}

/// Line 50 shares points 2 and 3 with lines 51 and 52; point 4 is only on line 50.
pub(crate) fn shared_street() -> DataSet {
    let mut data_set = DataSet::new();
    for id in 1..=7 {
        data_set.insert_point(point(id, 0.0, id as f64));
    }
    data_set.insert_line(Line::new(lid(50), vec![pid(1), pid(2), pid(3), pid(4)]));
    data_set.insert_line(Line::new(lid(51), vec![pid(5), pid(2)]));
    data_set.insert_line(Line::new(lid(52), vec![pid(3), pid(6), pid(7)]));
    data_set.insert_group(
        Group::new(gid(500), vec![Member::new("", lid(50))])
            .with_tags(tags(&[("type", "route"), ("name", "Ring")])),
    );
    data_set
}
