//! Two-step deletion flow with optimistic hide.
//!
//! Deleting a product walks through two confirmation steps before the
//! delete request is dispatched. The dispatch is fire-and-forget: the
//! flow shows its success dialog and schedules the card's removal on a
//! fixed timer without waiting for the backend, and a later failure
//! report is recorded for logging but does not bring the card back.
//! That gap is inherent to the optimistic design and is intentional.
//!
//! The machine performs no I/O itself; transitions return [`Effect`]s
//! that the caller executes (send the request, start timers, show or
//! hide the dialog).

use serde::Serialize;

use crate::category::Category;
use crate::group::ProductGroup;

/// How long the card stays visible after dispatch, regardless of how
/// long the backend takes.
pub const HIDE_DELAY_MS: u64 = 2_000;
/// How long the success dialog stays up before dismissing itself.
pub const DIALOG_AUTO_DISMISS_MS: u64 = 8_000;

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStage {
    /// No deletion in progress.
    Normal,
    /// First confirmation prompt is up.
    ConfirmStep1,
    /// Final warning prompt is up.
    ConfirmStep2,
    /// Delete request dispatched, hide timer pending.
    Deleting,
    /// Card removal scheduled or done; the flow is finished.
    Hidden,
}

/// The delete request payload sent to the backend: the product identity
/// plus every hosted file id the group references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommand {
    pub product_id: String,
    pub product_name: String,
    pub category: Category,
    pub file_ids: Vec<String>,
}

/// Side effects the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the delete request. Fire-and-forget: the flow does not wait
    /// for the response.
    DispatchDelete(DeleteCommand),
    ShowSuccessDialog,
    /// Schedule [`DeletionFlow::dialog_timer_elapsed`].
    StartDialogTimer { delay_ms: u64 },
    /// Schedule [`DeletionFlow::hide_timer_elapsed`].
    StartHideTimer { delay_ms: u64 },
    /// Remove the card from the visible gallery list.
    RemoveFromList,
    HideSuccessDialog,
}

/// Deletion state machine for one product group.
#[derive(Debug, Clone)]
pub struct DeletionFlow {
    stage: DeletionStage,
    command: DeleteCommand,
    dialog_visible: bool,
    removed: bool,
    failure: Option<String>,
}

impl DeletionFlow {
    /// Build a flow for a group, capturing the full file id list up
    /// front so the eventual delete covers every hosted asset.
    pub fn for_group(group: &ProductGroup) -> Self {
        Self {
            stage: DeletionStage::Normal,
            command: DeleteCommand {
                product_id: group.id().to_string(),
                product_name: group.name().to_string(),
                category: group.category(),
                file_ids: group.asset_ids(),
            },
            dialog_visible: false,
            removed: false,
            failure: None,
        }
    }

    pub fn stage(&self) -> DeletionStage {
        self.stage
    }

    pub fn is_dialog_visible(&self) -> bool {
        self.dialog_visible
    }

    /// The failure message from a reported delete error, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// User pressed the delete button on the card.
    pub fn request(&mut self) -> Vec<Effect> {
        if self.stage == DeletionStage::Normal {
            self.stage = DeletionStage::ConfirmStep1;
        }
        Vec::new()
    }

    /// User backed out of either confirmation prompt. Ignored once the
    /// request is in flight.
    pub fn cancel(&mut self) -> Vec<Effect> {
        if matches!(
            self.stage,
            DeletionStage::ConfirmStep1 | DeletionStage::ConfirmStep2
        ) {
            self.stage = DeletionStage::Normal;
        }
        Vec::new()
    }

    /// User confirmed the current prompt. The first confirmation only
    /// advances to the final warning; the second dispatches the delete.
    pub fn confirm(&mut self) -> Vec<Effect> {
        match self.stage {
            DeletionStage::ConfirmStep1 => {
                self.stage = DeletionStage::ConfirmStep2;
                Vec::new()
            }
            DeletionStage::ConfirmStep2 => {
                self.stage = DeletionStage::Deleting;
                vec![Effect::DispatchDelete(self.command.clone())]
            }
            _ => Vec::new(),
        }
    }

    /// The delete request has been handed to the transport. The flow
    /// immediately commits to the optimistic outcome: success dialog up,
    /// card hidden after a fixed delay.
    pub fn dispatched(&mut self) -> Vec<Effect> {
        if self.stage != DeletionStage::Deleting {
            return Vec::new();
        }
        self.stage = DeletionStage::Hidden;
        self.dialog_visible = true;
        vec![
            Effect::ShowSuccessDialog,
            Effect::StartDialogTimer {
                delay_ms: DIALOG_AUTO_DISMISS_MS,
            },
            Effect::StartHideTimer {
                delay_ms: HIDE_DELAY_MS,
            },
        ]
    }

    /// The fixed hide delay elapsed: remove the card now. Fires once.
    pub fn hide_timer_elapsed(&mut self) -> Vec<Effect> {
        if self.stage == DeletionStage::Hidden && !self.removed {
            self.removed = true;
            return vec![Effect::RemoveFromList];
        }
        Vec::new()
    }

    /// The dialog auto-dismiss delay elapsed.
    pub fn dialog_timer_elapsed(&mut self) -> Vec<Effect> {
        self.dismiss_dialog()
    }

    /// User dismissed the success dialog (button or Escape). Idempotent.
    pub fn dismiss_dialog(&mut self) -> Vec<Effect> {
        if self.dialog_visible {
            self.dialog_visible = false;
            vec![Effect::HideSuccessDialog]
        } else {
            Vec::new()
        }
    }

    /// The backend reported a delete failure. Recorded for logging only:
    /// the card stays hidden because the optimistic removal already
    /// happened or is scheduled.
    pub fn delete_failed(&mut self, message: impl Into<String>) -> Vec<Effect> {
        self.failure = Some(message.into());
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{ImageAsset, SidePair};
    use chrono::TimeZone;

    fn asset(id: &str) -> ImageAsset {
        ImageAsset {
            id: id.to_string(),
            url: format!("https://cdn.example.com/{id}.jpg"),
            file_size: 10,
        }
    }

    fn new_system_group() -> ProductGroup {
        ProductGroup::New {
            id: "prod-7".to_string(),
            name: "Blue Cap".to_string(),
            category: Category::Caps,
            upload_date: chrono::Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            original: SidePair {
                front: Some(asset("of")),
                back: Some(asset("ob")),
            },
            processed: SidePair {
                front: Some(asset("pf")),
                back: Some(asset("pb")),
            },
        }
    }

    /// Drive a flow through both confirmations, returning the dispatch
    /// effects.
    fn confirm_twice(flow: &mut DeletionFlow) -> Vec<Effect> {
        flow.request();
        let first = flow.confirm();
        assert!(first.is_empty(), "first confirm must not dispatch");
        flow.confirm()
    }

    // -- confirmation steps ---------------------------------------------------

    #[test]
    fn double_confirm_dispatches_exactly_once_with_all_file_ids() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        let effects = confirm_twice(&mut flow);

        assert_eq!(effects.len(), 1);
        let Effect::DispatchDelete(cmd) = &effects[0] else {
            panic!("expected a dispatch effect, got {effects:?}");
        };
        assert_eq!(cmd.product_id, "prod-7");
        assert_eq!(cmd.product_name, "Blue Cap");
        assert_eq!(cmd.category, Category::Caps);
        assert_eq!(cmd.file_ids, vec!["of", "ob", "pf", "pb"]);

        // Further confirms while deleting do nothing.
        assert!(flow.confirm().is_empty());
        assert_eq!(flow.stage(), DeletionStage::Deleting);
    }

    #[test]
    fn cancel_returns_to_normal_from_either_step() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        flow.request();
        assert_eq!(flow.stage(), DeletionStage::ConfirmStep1);
        flow.cancel();
        assert_eq!(flow.stage(), DeletionStage::Normal);

        flow.request();
        flow.confirm();
        assert_eq!(flow.stage(), DeletionStage::ConfirmStep2);
        flow.cancel();
        assert_eq!(flow.stage(), DeletionStage::Normal);
    }

    #[test]
    fn cancel_after_dispatch_is_ignored() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        confirm_twice(&mut flow);
        flow.cancel();
        assert_eq!(flow.stage(), DeletionStage::Deleting);
    }

    #[test]
    fn request_outside_normal_stage_is_ignored() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        flow.request();
        flow.request();
        assert_eq!(flow.stage(), DeletionStage::ConfirmStep1);
    }

    // -- optimistic hide ------------------------------------------------------

    #[test]
    fn dispatch_schedules_dialog_and_hide_timers() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        confirm_twice(&mut flow);

        let effects = flow.dispatched();
        assert_eq!(flow.stage(), DeletionStage::Hidden);
        assert!(flow.is_dialog_visible());
        assert_eq!(
            effects,
            vec![
                Effect::ShowSuccessDialog,
                Effect::StartDialogTimer {
                    delay_ms: DIALOG_AUTO_DISMISS_MS
                },
                Effect::StartHideTimer {
                    delay_ms: HIDE_DELAY_MS
                },
            ]
        );
    }

    #[test]
    fn hide_timer_removes_card_exactly_once() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        confirm_twice(&mut flow);
        flow.dispatched();

        assert_eq!(flow.hide_timer_elapsed(), vec![Effect::RemoveFromList]);
        assert!(flow.hide_timer_elapsed().is_empty());
    }

    #[test]
    fn hide_timer_before_dispatch_does_nothing() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        assert!(flow.hide_timer_elapsed().is_empty());
    }

    // -- success dialog -------------------------------------------------------

    #[test]
    fn dialog_dismiss_is_idempotent() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        confirm_twice(&mut flow);
        flow.dispatched();

        assert_eq!(flow.dismiss_dialog(), vec![Effect::HideSuccessDialog]);
        assert!(flow.dismiss_dialog().is_empty());
        assert!(flow.dialog_timer_elapsed().is_empty());
    }

    #[test]
    fn dialog_auto_dismiss_hides_dialog() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        confirm_twice(&mut flow);
        flow.dispatched();

        assert_eq!(flow.dialog_timer_elapsed(), vec![Effect::HideSuccessDialog]);
        assert!(!flow.is_dialog_visible());
    }

    // -- failure reporting ----------------------------------------------------

    #[test]
    fn delete_failure_is_recorded_but_never_rolls_back() {
        let mut flow = DeletionFlow::for_group(&new_system_group());
        confirm_twice(&mut flow);
        flow.dispatched();

        let effects = flow.delete_failed("webhook returned 500");
        assert!(effects.is_empty());
        assert_eq!(flow.failure(), Some("webhook returned 500"));

        // The card still leaves the list on schedule.
        assert_eq!(flow.stage(), DeletionStage::Hidden);
        assert_eq!(flow.hide_timer_elapsed(), vec![Effect::RemoveFromList]);
    }
}
