// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use libc::SIGKILL;
use std::os::unix::process::CommandExt;
use tokio::process::Child;

/// Pre-execution configuration on Unix.
///
/// This puts the child in its own process group, so that anything it spawns can be killed along
/// with it.
pub(super) fn set_process_group(cmd: &mut std::process::Command) {
    cmd.process_group(0);
}

/// Kills the child's process group, then reaps the child.
pub(super) async fn terminate_child(child: &mut Child, child_pid: Option<u32>) {
    if let Some(pid) = child_pid {
        // A negative pid addresses the whole process group, which was created with the child's
        // pid as its id.
        unsafe {
            libc::kill(-(pid as libc::pid_t), SIGKILL);
        }
    }

    // The group kill above normally covers the child too; this handles the case where the pid
    // was not available.
    let _ = child.start_kill();
    let _ = child.wait().await;
}
