// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use tokio::process::Child;

// Process groups are a Unix concept; this is a no-op on Windows.
pub(super) fn set_process_group(_cmd: &mut std::process::Command) {}

pub(super) async fn terminate_child(child: &mut Child, _child_pid: Option<u32>) {
    let _ = child.start_kill();
    let _ = child.wait().await;
}
