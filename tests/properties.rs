// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use proptest::prelude::*;

use unglue::collab::{AllowAll, FixedPolicy, Silent};
use unglue::model::{EntityFlags, Group, GroupId, Line, LineId, Member, Point, PointId, Tags};
use unglue::query::Topology;
use unglue::unglue::{classify, Shape, UnglueSummary};
use unglue::{
    Collaborators, DataSet, EntityRef, LatLon, PolicyChoice, SplitPolicy, UndoStack, UnglueAction, UnglueError,
    UnglueOutcome,
};

const HUB: i64 = 1;

fn p(value: i64) -> PointId {
    PointId::new(value).expect("point id")
}

fn l(value: i64) -> LineId {
    LineId::new(value).expect("line id")
}

#[derive(Clone, Copy, Debug)]
enum Attach {
    Start,
    End,
    Middle,
}

fn attach_strategy() -> impl Strategy<Value = Attach> {
    prop_oneof![Just(Attach::Start), Just(Attach::End), Just(Attach::Middle)]
}

fn policy_strategy() -> impl Strategy<Value = Option<SplitPolicy>> {
    prop_oneof![
        Just(None),
        Just(Some(SplitPolicy::KeepOnOriginal)),
        Just(Some(SplitPolicy::DuplicateOntoBoth)),
        Just(Some(SplitPolicy::MoveToCopies)),
    ]
}

fn add_point(data_set: &mut DataSet, id: i64) {
    data_set.insert_point(Point::new(p(id), LatLon::new(id as f64 * 0.001, 0.0)));
}

/// Lines 10, 11, ... each touching the hub once, at the given position.
fn star(attachments: &[Attach], hub_tags: Tags) -> DataSet {
    let mut data_set = DataSet::new();
    data_set.insert_point(Point::new(p(HUB), LatLon::new(0.0, 0.0)).with_tags(hub_tags));
    for (index, attach) in attachments.iter().enumerate() {
        let a = 100 + 10 * index as i64;
        let b = a + 1;
        add_point(&mut data_set, a);
        add_point(&mut data_set, b);
        let nodes = match attach {
            Attach::Start => vec![p(HUB), p(a), p(b)],
            Attach::End => vec![p(a), p(b), p(HUB)],
            Attach::Middle => vec![p(a), p(HUB), p(b)],
        };
        data_set.insert_line(Line::new(l(10 + index as i64), nodes));
    }
    data_set.set_selection([EntityRef::Point(p(HUB))]);
    data_set
}

fn run(data_set: &mut DataSet, choice: PolicyChoice, log: &mut UndoStack) -> UnglueSummary {
    let mut policy = FixedPolicy(choice);
    let mut gate = AllowAll;
    let mut notifier = Silent;
    let mut collab = Collaborators::new(&mut policy, &mut gate, &mut notifier, log);
    match UnglueAction::default().run(data_set, &mut collab).expect("unglue") {
        UnglueOutcome::Committed(summary) => summary,
        UnglueOutcome::Cancelled => panic!("fixed policy never cancels"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn every_line_but_the_owner_gets_its_own_copy(
        attachments in prop::collection::vec(attach_strategy(), 2..7),
    ) {
        let mut data_set = star(&attachments, Tags::new());
        let before = data_set.clone();
        let owner = attachments.iter().position(|a| matches!(a, Attach::Middle)).unwrap_or(0);

        let choice = PolicyChoice::new(None, Some(SplitPolicy::KeepOnOriginal));
        let summary = run(&mut data_set, choice, &mut UndoStack::new());
        prop_assert_eq!(summary.new_points.len(), attachments.len() - 1);

        let mut seen = BTreeSet::new();
        for index in 0..attachments.len() {
            let id = l(10 + index as i64);
            let old = before.line(id).expect("line").nodes();
            let new = data_set.line(id).expect("line").nodes();
            prop_assert_eq!(old.len(), new.len());
            if index == owner {
                prop_assert_eq!(old, new);
                continue;
            }
            let position = old.iter().position(|n| *n == p(HUB)).expect("hub");
            let copy = new[position];
            prop_assert!(summary.new_points.contains(&copy));
            prop_assert!(seen.insert(copy));
            for (o, n) in old.iter().zip(new) {
                if *o != p(HUB) {
                    prop_assert_eq!(o, n);
                }
            }
        }
    }

    #[test]
    fn undo_restores_points_lines_and_groups(
        attachments in prop::collection::vec(attach_strategy(), 2..6),
        tags in policy_strategy(),
        memberships in policy_strategy(),
        role in "[a-z]{0,6}",
        lead in 0usize..3,
    ) {
        let hub_tags = [("highway", "traffic_signals")].into_iter().collect::<Tags>();
        let mut data_set = star(&attachments, hub_tags);
        let mut members = (0..lead).map(|i| Member::new("", l(10 + (i % attachments.len()) as i64))).collect::<Vec<_>>();
        members.push(Member::new(role.as_str(), p(HUB)));
        members.push(Member::new("", l(10)));
        data_set.insert_group(Group::new(GroupId::new(700).expect("group id"), members));
        let before = data_set.clone();

        let mut log = UndoStack::new();
        run(&mut data_set, PolicyChoice::new(tags, memberships), &mut log);
        log.undo(&mut data_set).expect("undo");

        prop_assert_eq!(data_set.points(), before.points());
        prop_assert_eq!(data_set.lines(), before.lines());
        prop_assert_eq!(data_set.groups(), before.groups());
    }

    #[test]
    fn self_crossing_splits_every_later_visit(visits in 2usize..7) {
        let mut data_set = DataSet::new();
        add_point(&mut data_set, HUB);
        let mut nodes = Vec::new();
        for visit in 0..visits {
            nodes.push(p(HUB));
            let filler = 100 + visit as i64;
            add_point(&mut data_set, filler);
            nodes.push(p(filler));
        }
        data_set.insert_line(Line::new(l(10), nodes.clone()));
        data_set.set_selection([EntityRef::Point(p(HUB))]);

        let summary = run(&mut data_set, PolicyChoice::default(), &mut UndoStack::new());
        prop_assert_eq!(summary.new_points.len(), visits - 1);

        let rewritten = data_set.line(l(10)).expect("line").nodes();
        let hub_positions = nodes.iter().enumerate().filter(|(_, n)| **n == p(HUB)).map(|(i, _)| i).collect::<Vec<_>>();
        prop_assert_eq!(rewritten[hub_positions[0]], p(HUB));
        let later = hub_positions[1..].iter().map(|i| rewritten[*i]).collect::<Vec<_>>();
        prop_assert_eq!(later, summary.new_points.clone());
        prop_assert_eq!(summary.new_points.iter().collect::<BTreeSet<_>>().len(), visits - 1);
    }

    #[test]
    fn moving_tags_empties_the_original(
        attachments in prop::collection::vec(attach_strategy(), 2..6),
        keys in prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9 ]{1,8}", 1..4),
    ) {
        let hub_tags = keys.into_iter().collect::<Tags>();
        let mut data_set = star(&attachments, hub_tags.clone());

        let summary = run(&mut data_set, PolicyChoice::new(Some(SplitPolicy::MoveToCopies), None), &mut UndoStack::new());
        prop_assert!(data_set.point(p(HUB)).expect("hub").tags().is_empty());
        for copy in &summary.new_points {
            prop_assert_eq!(data_set.point(*copy).expect("copy").tags(), &hub_tags);
        }
    }

    #[test]
    fn duplicate_onto_both_adds_copies_right_after_the_original(lead in 0usize..4, trail in 0usize..4) {
        // Three middle attachments: two copies.
        let mut data_set = star(&[Attach::Middle, Attach::Middle, Attach::Middle], Tags::new());
        let mut members = (0..lead).map(|_| Member::new("", l(10))).collect::<Vec<_>>();
        members.push(Member::new("stop", p(HUB)));
        members.extend((0..trail).map(|_| Member::new("", l(11))));
        let group_id = GroupId::new(700).expect("group id");
        data_set.insert_group(Group::new(group_id, members));

        let summary = run(&mut data_set, PolicyChoice::new(None, Some(SplitPolicy::DuplicateOntoBoth)), &mut UndoStack::new());
        let members = data_set.group(group_id).expect("group").members();
        prop_assert_eq!(members.len(), lead + trail + 3);
        prop_assert_eq!(&members[lead], &Member::new("stop", p(HUB)));
        prop_assert_eq!(&members[lead + 1], &Member::new("stop", summary.new_points[0]));
        prop_assert_eq!(&members[lead + 2], &Member::new("stop", summary.new_points[1]));
        prop_assert_eq!(members.iter().filter(|m| m.role.as_str() == "stop").count(), 3);
    }

    #[test]
    fn bare_line_selection_defaults_to_its_glued_points(
        main in prop::collection::vec(1i64..7, 2..9),
        others in prop::collection::vec((prop::collection::vec(1i64..7, 1..4), any::<bool>()), 0..5),
    ) {
        let mut data_set = DataSet::new();
        for id in 1..7 {
            add_point(&mut data_set, id);
        }
        data_set.insert_line(Line::new(l(10), main.iter().map(|id| p(*id)).collect()));
        for (index, (nodes, deleted)) in others.iter().enumerate() {
            let flags = EntityFlags { deleted: *deleted, ..EntityFlags::default() };
            let line = Line::new(l(20 + index as i64), nodes.iter().map(|id| p(*id)).collect()).with_flags(flags);
            data_set.insert_line(line);
        }
        let topology = Topology::build(&data_set);
        let selection = [EntityRef::Line(l(10))];

        let mut expected = Vec::new();
        for id in &main {
            if !expected.contains(&p(*id)) && topology.usable_parent_line_count(p(*id)) >= 2 {
                expected.push(p(*id));
            }
        }

        let first = classify(&topology, &selection);
        if expected.is_empty() {
            prop_assert_eq!(&first, &Err(UnglueError::NoGluedPoints { explicit: false }));
        } else {
            prop_assert_eq!(&first, &Ok(Shape::OneLineAnyPoints { line: l(10), points: expected }));
        }
        prop_assert_eq!(classify(&topology, &selection), first);
    }
}
