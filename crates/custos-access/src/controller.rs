//! # Admission Controller Service
//!
//! Intake, review, and account provisioning for access requests.
//!
//! ## Transaction Boundary
//!
//! One mutex guards the request store, the pending-uniqueness indexes,
//! and the account store together. Intake's duplicate check and insert
//! happen in the same critical section, so two concurrent submissions
//! for one badge cannot both pass the check. Approval's username check,
//! account insert, and request transition share a critical section the
//! same way — if the username is taken at provisioning time, the
//! request is left pending and no account is created.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use custos_core::{Actor, BadgeNumber, RequestId, Role, Timestamp, Username};
use custos_crypto::PlaintextSecret;
use custos_gate::{allowed, Action, Resource};
use custos_state::RequestStatus;

use crate::account::ProvisionedAccount;
use crate::error::AdmissionError;
use crate::issuer::CredentialIssuer;
use crate::request::{AccessRequest, AccessRequestForm};

// ─── Outputs ─────────────────────────────────────────────────────────

/// Result of an approval: the reviewed request, the provisioned account,
/// and the plaintext secret for its single disclosure.
///
/// `Debug` on this type redacts the secret (via [`PlaintextSecret`]);
/// there is no `Serialize` — transport layers must build their own
/// response shape and decide explicitly what to disclose.
#[derive(Debug)]
pub struct ApprovalReceipt {
    /// The request, now approved.
    pub request: AccessRequest,
    /// The provisioned account record.
    pub account: ProvisionedAccount,
    /// The temporary secret. Returned here and never again.
    pub secret: PlaintextSecret,
}

// ─── Store ───────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
    requests: HashMap<RequestId, AccessRequest>,
    /// Uniqueness index: badge number -> pending request.
    pending_badges: HashMap<String, RequestId>,
    /// Uniqueness index: username -> pending request.
    pending_usernames: HashMap<String, RequestId>,
    /// Provisioned accounts by username.
    accounts: HashMap<String, ProvisionedAccount>,
}

// ─── Controller ──────────────────────────────────────────────────────

/// The access admission service.
#[derive(Default)]
pub struct AdmissionController {
    issuer: CredentialIssuer,
    inner: Mutex<Inner>,
}

impl AdmissionController {
    /// Create an empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// File an access request from the public form.
    ///
    /// Creates no account and no credential — only a pending request.
    ///
    /// # Errors
    ///
    /// - `Validation` on missing name, badge number, or username.
    /// - `DuplicatePending` if a pending request already holds the badge
    ///   number or the username.
    /// - `UsernameTaken` if the username already maps to an account.
    pub fn submit(&self, form: AccessRequestForm) -> Result<AccessRequest, AdmissionError> {
        if form.full_name.trim().is_empty() {
            return Err(AdmissionError::Validation {
                field: "full_name",
                message: "must not be empty".to_string(),
            });
        }
        let badge_number =
            BadgeNumber::new(&form.badge_number).map_err(|e| AdmissionError::Validation {
                field: "badge_number",
                message: e.to_string(),
            })?;
        let requested_username =
            Username::new(&form.requested_username).map_err(|e| AdmissionError::Validation {
                field: "requested_username",
                message: e.to_string(),
            })?;

        let mut inner = self.lock_inner();
        if inner.pending_badges.contains_key(badge_number.as_str()) {
            return Err(AdmissionError::DuplicatePending {
                field: "badge_number",
                value: badge_number.as_str().to_string(),
            });
        }
        if inner
            .pending_usernames
            .contains_key(requested_username.as_str())
        {
            return Err(AdmissionError::DuplicatePending {
                field: "requested_username",
                value: requested_username.as_str().to_string(),
            });
        }
        if inner.accounts.contains_key(requested_username.as_str()) {
            return Err(AdmissionError::UsernameTaken {
                username: requested_username,
            });
        }

        let request = AccessRequest {
            id: RequestId::new(),
            full_name: form.full_name.trim().to_string(),
            badge_number: badge_number.clone(),
            department: form.department,
            phone_extension: form.phone_extension,
            requested_username: requested_username.clone(),
            reason: form.reason,
            status: RequestStatus::Pending,
            requested_at: Timestamp::now(),
            reviewed_at: None,
            reviewed_by: None,
            review_notes: None,
        };
        inner
            .pending_badges
            .insert(badge_number.as_str().to_string(), request.id);
        inner
            .pending_usernames
            .insert(requested_username.as_str().to_string(), request.id);
        inner.requests.insert(request.id, request.clone());
        Ok(request)
    }

    /// Approve a pending request, provisioning an account.
    ///
    /// `role` is the role the reviewer grants. The returned receipt
    /// carries the plaintext secret for its one and only disclosure.
    ///
    /// # Errors
    ///
    /// `Permission`, `NotFound`, `AlreadyReviewed`, or — when the
    /// username was claimed since intake — `UsernameTaken`, in which
    /// case the request remains pending and no account is created.
    pub fn approve(
        &self,
        request_id: RequestId,
        reviewer: &Actor,
        role: Role,
        notes: Option<String>,
    ) -> Result<ApprovalReceipt, AdmissionError> {
        authorize_reviewer(reviewer)?;

        let mut inner = self.lock_inner();
        let request = inner
            .requests
            .get(&request_id)
            .ok_or(AdmissionError::NotFound { request_id })?;
        request.status.validate_review()?;

        let username = request.requested_username.clone();
        let badge = request.badge_number.as_str().to_string();
        let department = request.department;
        // Final authority on uniqueness: the earlier intake check does
        // not survive races with other provisioning paths.
        if inner.accounts.contains_key(username.as_str()) {
            return Err(AdmissionError::UsernameTaken { username });
        }

        let (account, secret) = self.issuer.issue(&username, role, department);
        inner
            .accounts
            .insert(username.as_str().to_string(), account.clone());

        let request = match inner.requests.get_mut(&request_id) {
            Some(request) => {
                request.status = RequestStatus::Approved;
                request.reviewed_at = Some(Timestamp::now());
                request.reviewed_by = Some(reviewer.account_id);
                request.review_notes = notes;
                request.clone()
            }
            // Unreachable: the request was present above and the lock is
            // still held.
            None => return Err(AdmissionError::NotFound { request_id }),
        };
        inner.pending_badges.remove(&badge);
        inner.pending_usernames.remove(username.as_str());

        Ok(ApprovalReceipt {
            request,
            account,
            secret,
        })
    }

    /// Deny a pending request. No account side-effects.
    ///
    /// # Errors
    ///
    /// `Permission`, `NotFound`, or `AlreadyReviewed`.
    pub fn deny(
        &self,
        request_id: RequestId,
        reviewer: &Actor,
        notes: Option<String>,
    ) -> Result<AccessRequest, AdmissionError> {
        authorize_reviewer(reviewer)?;

        let mut inner = self.lock_inner();
        let request = inner
            .requests
            .get_mut(&request_id)
            .ok_or(AdmissionError::NotFound { request_id })?;
        request.status.validate_review()?;

        request.status = RequestStatus::Denied;
        request.reviewed_at = Some(Timestamp::now());
        request.reviewed_by = Some(reviewer.account_id);
        request.review_notes = notes;
        let snapshot = request.clone();

        let badge = snapshot.badge_number.as_str().to_string();
        let username = snapshot.requested_username.as_str().to_string();
        inner.pending_badges.remove(&badge);
        inner.pending_usernames.remove(&username);
        Ok(snapshot)
    }

    /// Fetch a request by id.
    pub fn get(&self, request_id: RequestId) -> Result<AccessRequest, AdmissionError> {
        let inner = self.lock_inner();
        inner
            .requests
            .get(&request_id)
            .cloned()
            .ok_or(AdmissionError::NotFound { request_id })
    }

    /// All pending requests, oldest first.
    pub fn pending(&self) -> Vec<AccessRequest> {
        let inner = self.lock_inner();
        let mut pending: Vec<AccessRequest> = inner
            .requests
            .values()
            .filter(|r| r.status == RequestStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|r| r.requested_at);
        pending
    }

    /// Verify a login attempt against the stored hash.
    ///
    /// This is the only read path touching credentials, and it answers
    /// only yes or no — the plaintext secret is never reconstructible.
    pub fn authenticate(&self, username: &str, secret: &str) -> bool {
        let Ok(username) = Username::new(username) else {
            return false;
        };
        let inner = self.lock_inner();
        inner
            .accounts
            .get(username.as_str())
            .map(|account| account.secret_hash.verify(secret))
            .unwrap_or(false)
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        // Recover from poisoning: every critical section leaves the
        // store consistent before any fallible call.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn authorize_reviewer(reviewer: &Actor) -> Result<(), AdmissionError> {
    if allowed(reviewer, Action::ReviewAccess, &Resource::AdmissionQueue) {
        Ok(())
    } else {
        Err(AdmissionError::Permission)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use custos_core::{AccountId, Department};
    use custos_crypto::SECRET_LEN;
    use std::sync::Arc;

    fn admin() -> Actor {
        Actor::new(AccountId::new(), "Chief Admin", Role::Admin, Department::Ibs)
    }

    fn form(badge: &str, username: &str) -> AccessRequestForm {
        AccessRequestForm {
            full_name: "Jane Doe".to_string(),
            badge_number: badge.to_string(),
            department: Department::Fraude,
            phone_extension: None,
            requested_username: username.to_string(),
            reason: "assigned to the fraud desk".to_string(),
        }
    }

    // ── Intake ───────────────────────────────────────────────────────

    #[test]
    fn test_submit_creates_pending_request() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.reviewed_at.is_none());
        assert_eq!(controller.pending().len(), 1);
        // No account exists until approval.
        assert!(!controller.authenticate("jdoe", "anything"));
    }

    #[test]
    fn test_submit_missing_fields_rejected() {
        let controller = AdmissionController::new();

        let mut bad = form("B-42", "jdoe");
        bad.full_name = "  ".to_string();
        assert!(matches!(
            controller.submit(bad),
            Err(AdmissionError::Validation { field: "full_name", .. })
        ));

        assert!(matches!(
            controller.submit(form("  ", "jdoe")),
            Err(AdmissionError::Validation { field: "badge_number", .. })
        ));

        assert!(matches!(
            controller.submit(form("B-42", "j doe!")),
            Err(AdmissionError::Validation { field: "requested_username", .. })
        ));
    }

    #[test]
    fn test_duplicate_pending_badge_rejected() {
        let controller = AdmissionController::new();
        controller.submit(form("B-42", "jdoe")).unwrap();
        let err = controller.submit(form("B-42", "other")).unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::DuplicatePending { field: "badge_number", .. }
        ));
    }

    #[test]
    fn test_duplicate_pending_username_rejected() {
        let controller = AdmissionController::new();
        controller.submit(form("B-42", "jdoe")).unwrap();
        let err = controller.submit(form("B-43", "jdoe")).unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::DuplicatePending { field: "requested_username", .. }
        ));
    }

    #[test]
    fn test_denied_request_frees_badge_and_username() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();
        controller.deny(request.id, &admin(), None).unwrap();
        // Terminal request no longer blocks resubmission.
        controller.submit(form("B-42", "jdoe")).unwrap();
    }

    #[test]
    fn test_taken_username_rejected_at_intake() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();
        controller.approve(request.id, &admin(), Role::User, None).unwrap();

        let err = controller.submit(form("B-43", "jdoe")).unwrap_err();
        assert!(matches!(err, AdmissionError::UsernameTaken { .. }));
    }

    // ── Review ───────────────────────────────────────────────────────

    #[test]
    fn test_approve_provisions_and_discloses_once() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();

        let receipt = controller
            .approve(request.id, &admin(), Role::Analyst, Some("vetted".to_string()))
            .unwrap();
        assert_eq!(receipt.request.status, RequestStatus::Approved);
        assert_eq!(receipt.account.username.as_str(), "jdoe");
        assert_eq!(receipt.account.role, Role::Analyst);
        assert_eq!(receipt.secret.expose().len(), SECRET_LEN);

        // The disclosed secret authenticates against the stored hash.
        assert!(controller.authenticate("jdoe", receipt.secret.expose()));
        assert!(!controller.authenticate("jdoe", "not-the-secret"));

        // No read path returns the plaintext again: the stored request
        // and account expose no secret field, and the receipt's Debug
        // form redacts it.
        let stored = controller.get(request.id).unwrap();
        let json = serde_json::to_string(&stored).unwrap();
        assert!(!json.contains(receipt.secret.expose()));
        let debug = format!("{receipt:?}");
        assert!(!debug.contains(receipt.secret.expose()));
    }

    #[test]
    fn test_second_review_rejected() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();
        controller.approve(request.id, &admin(), Role::User, None).unwrap();

        let err = controller
            .approve(request.id, &admin(), Role::User, None)
            .unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::AlreadyReviewed { status: RequestStatus::Approved }
        ));

        let err = controller.deny(request.id, &admin(), None).unwrap_err();
        assert!(matches!(err, AdmissionError::AlreadyReviewed { .. }));
    }

    #[test]
    fn test_deny_leaves_no_account() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();
        let denied = controller
            .deny(request.id, &admin(), Some("unverifiable badge".to_string()))
            .unwrap();
        assert_eq!(denied.status, RequestStatus::Denied);
        assert!(!controller.authenticate("jdoe", "anything"));

        let err = controller
            .approve(request.id, &admin(), Role::User, None)
            .unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::AlreadyReviewed { status: RequestStatus::Denied }
        ));
    }

    #[test]
    fn test_review_requires_admission_capability() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();

        for role in [Role::Investigator, Role::Analyst, Role::User] {
            let reviewer = Actor::new(AccountId::new(), "Not An Admin", role, Department::Ibs);
            assert!(matches!(
                controller.approve(request.id, &reviewer, Role::User, None),
                Err(AdmissionError::Permission)
            ));
            assert!(matches!(
                controller.deny(request.id, &reviewer, None),
                Err(AdmissionError::Permission)
            ));
        }
        // Denied reviews caused no transition.
        assert_eq!(controller.get(request.id).unwrap().status, RequestStatus::Pending);
    }

    #[test]
    fn test_approve_unknown_request() {
        let controller = AdmissionController::new();
        assert!(matches!(
            controller.approve(RequestId::new(), &admin(), Role::User, None),
            Err(AdmissionError::NotFound { .. })
        ));
    }

    // ── The worked scenario ──────────────────────────────────────────

    #[test]
    fn test_scenario_badge_b42() {
        let controller = AdmissionController::new();
        let request = controller.submit(form("B-42", "jdoe")).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        let receipt = controller
            .approve(request.id, &admin(), Role::User, None)
            .unwrap();
        assert_eq!(receipt.account.username.as_str(), "jdoe");
        assert_eq!(receipt.secret.expose().len(), 12);
        assert_eq!(controller.get(request.id).unwrap().status, RequestStatus::Approved);

        let err = controller
            .approve(request.id, &admin(), Role::User, None)
            .unwrap_err();
        assert!(matches!(err, AdmissionError::AlreadyReviewed { .. }));
    }

    // ── Concurrency ──────────────────────────────────────────────────

    #[test]
    fn test_racing_submissions_one_wins() {
        let controller = Arc::new(AdmissionController::new());
        let mut handles = Vec::new();
        for username in ["jdoe", "jdoe2"] {
            let controller = Arc::clone(&controller);
            let username = username.to_string();
            handles.push(std::thread::spawn(move || {
                controller.submit(form("B-42", &username))
            }));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(AdmissionError::DuplicatePending { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(duplicates, 1);
        assert_eq!(controller.pending().len(), 1);
    }
}
