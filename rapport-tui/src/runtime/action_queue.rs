use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::CellKey;

/// Remote work queued by key handlers and drained by the event loop. Every
/// network call goes through here; handlers themselves never await.
#[derive(Debug, Clone)]
pub(super) enum Action {
    LoadReport,
    RefreshReportBackground,
    /// Blur of one grid cell: run the editor's commit, then merge.
    CommitCell {
        key: CellKey,
    },
    LoadAccounts,
    LoadTasks,
    LoadUsers,
    LoadSpecialDays,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
