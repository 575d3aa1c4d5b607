use crate::sync::SyncInvoker;

/// Split command line for a fake sync tool running `script` under `sh -c`.
///
/// The trailing `sh` becomes `$0`, so source and destination land in `$1`
/// and `$2` and any forwarded options follow.
pub(crate) fn fake_sync_command(script: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        script.to_string(),
        "sh".to_string(),
    ]
}

pub(crate) fn fake_sync(script: &str) -> SyncInvoker {
    SyncInvoker::new(&fake_sync_command(script)).unwrap()
}
