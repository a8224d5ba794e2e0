//! Testing utilities for the standby workspace
//!
//! Shared layout fixtures and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use standby_model::{ChangelogPartition, ContainerLayout, ContainerModel, Partition, TaskModel};

pub const TEST_SYSTEM: &str = "kafka";
pub const TEST_STREAM: &str = "page-views";

pub fn partition(n: u32) -> Partition {
    Partition::new(TEST_SYSTEM, TEST_STREAM, n)
}

/// Active task `Partition <n>` consuming partition `n`, change log `n`
pub fn active_task(n: u32) -> TaskModel {
    TaskModel::active(format!("Partition {n}"), [partition(n)], ChangelogPartition::new(n))
}

pub fn container(id: &str, partitions: &[u32]) -> ContainerModel {
    ContainerModel::from_tasks(id, partitions.iter().map(|&n| active_task(n))).unwrap()
}

pub fn layout_from(containers: &[(&str, &[u32])]) -> ContainerLayout {
    ContainerLayout::from_containers(containers.iter().map(|(id, ps)| container(id, ps))).unwrap()
}

/// `{"0": [P0, P1], "1": [P2, P3]}`
pub fn sample_layout() -> ContainerLayout {
    layout_from(&[("0", &[0, 1]), ("1", &[2, 3])])
}

/// Active layouts with numeric container ids and job-unique task names
///
/// Each entry of the generated vector is the task count of one container;
/// partitions are numbered consecutively across containers.
pub fn arb_active_layout(
    max_containers: usize,
    max_tasks: usize,
) -> impl Strategy<Value = ContainerLayout> {
    proptest::collection::vec(0..=max_tasks, 0..=max_containers).prop_map(|task_counts| {
        let mut next = 0u32;
        let containers = task_counts.into_iter().enumerate().map(|(i, count)| {
            let partitions: Vec<u32> = (next..next + count as u32).collect();
            next += count as u32;
            container(&i.to_string(), &partitions)
        });
        ContainerLayout::from_containers(containers.collect::<Vec<_>>()).unwrap()
    })
}
