use std::mem;

use rum_core::ProcessModuleInfo;
use tracing::debug;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, TH32CS_SNAPMODULE,
    TH32CS_SNAPMODULE32,
};

/// Reads the primary (first) module of a process.
///
/// Takes a ToolHelp module snapshot of `pid`. Returns the default (empty)
/// info when the pid is unknown, the process has exited, or access is
/// denied.
pub fn module_info(pid: u32) -> ProcessModuleInfo {
    if pid == 0 {
        return ProcessModuleInfo::default();
    }

    // SAFETY: CreateToolhelp32Snapshot returns an owned handle that we
    // close below on every path.
    let snapshot =
        match unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) } {
            Ok(handle) => handle,
            Err(e) => {
                debug!("module snapshot of pid {pid} failed: {e}");
                return ProcessModuleInfo::default();
            }
        };

    let mut entry = MODULEENTRY32W {
        dwSize: mem::size_of::<MODULEENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: the snapshot handle is valid and dwSize is set as required.
    let first = unsafe { Module32FirstW(snapshot, &mut entry) };

    // SAFETY: we own the snapshot handle and close it exactly once.
    unsafe {
        let _ = CloseHandle(snapshot);
    }

    if let Err(e) = first {
        debug!("no modules for pid {pid}: {e}");
        return ProcessModuleInfo::default();
    }

    ProcessModuleInfo::from_module(
        from_wide(&entry.szExePath),
        &from_wide(&entry.szModule),
    )
}

/// Decodes a NUL-terminated UTF-16 buffer.
pub(crate) fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}
