#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::auth::{
        AuthProvider, FederatedIntent, Identity, ProviderError, ProviderErrorCode,
    };
    use crate::error::AuthError;
    use crate::session::model::{GateEvent, GateState, ScreenMode};
    use crate::session::SessionGate;

    fn identity() -> Identity {
        Identity::new("user@example.com", "password")
    }

    // Mock AuthProvider for testing
    struct MockAuthProvider {
        sign_in_result: Mutex<Result<Identity, ProviderError>>,
        sign_up_result: Mutex<Result<Identity, ProviderError>>,
        popup_result: Mutex<Result<Identity, ProviderError>>,
        redirect_start_result: Mutex<Result<(), ProviderError>>,
        redirect_result: Mutex<Result<Option<Identity>, ProviderError>>,
        sign_out_result: Mutex<Result<(), ProviderError>>,
        sign_in_calls: AtomicUsize,
        sign_up_calls: AtomicUsize,
        popup_calls: AtomicUsize,
        redirect_calls: AtomicUsize,
        sign_out_calls: AtomicUsize,
    }

    impl MockAuthProvider {
        fn new() -> Self {
            Self {
                sign_in_result: Mutex::new(Ok(identity())),
                sign_up_result: Mutex::new(Ok(identity())),
                popup_result: Mutex::new(Ok(identity())),
                redirect_start_result: Mutex::new(Ok(())),
                redirect_result: Mutex::new(Ok(None)),
                sign_out_result: Mutex::new(Ok(())),
                sign_in_calls: AtomicUsize::new(0),
                sign_up_calls: AtomicUsize::new(0),
                popup_calls: AtomicUsize::new(0),
                redirect_calls: AtomicUsize::new(0),
                sign_out_calls: AtomicUsize::new(0),
            }
        }

        fn set_sign_in(&self, result: Result<Identity, ProviderError>) {
            *self.sign_in_result.lock().unwrap() = result;
        }

        fn set_sign_up(&self, result: Result<Identity, ProviderError>) {
            *self.sign_up_result.lock().unwrap() = result;
        }

        fn set_popup(&self, result: Result<Identity, ProviderError>) {
            *self.popup_result.lock().unwrap() = result;
        }

        fn set_sign_out(&self, result: Result<(), ProviderError>) {
            *self.sign_out_result.lock().unwrap() = result;
        }
    }

    #[async_trait]
    impl AuthProvider for MockAuthProvider {
        async fn sign_in(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<Identity, ProviderError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_in_result.lock().unwrap().clone()
        }

        async fn sign_up(
            &self,
            _email: &str,
            _password: &str,
        ) -> Result<Identity, ProviderError> {
            self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_up_result.lock().unwrap().clone()
        }

        async fn sign_in_with_popup(
            &self,
            _intent: FederatedIntent,
        ) -> Result<Identity, ProviderError> {
            self.popup_calls.fetch_add(1, Ordering::SeqCst);
            self.popup_result.lock().unwrap().clone()
        }

        async fn sign_in_with_redirect(
            &self,
            _intent: FederatedIntent,
        ) -> Result<(), ProviderError> {
            self.redirect_calls.fetch_add(1, Ordering::SeqCst);
            self.redirect_start_result.lock().unwrap().clone()
        }

        async fn redirect_result(&self) -> Result<Option<Identity>, ProviderError> {
            self.redirect_result.lock().unwrap().clone()
        }

        async fn sign_out(&self) -> Result<(), ProviderError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_out_result.lock().unwrap().clone()
        }

        fn subscribe(&self) -> mpsc::UnboundedReceiver<Option<Identity>> {
            let (_tx, rx) = mpsc::unbounded_channel();
            rx
        }
    }

    fn gate() -> (
        Arc<MockAuthProvider>,
        SessionGate,
        mpsc::UnboundedReceiver<GateEvent>,
    ) {
        let provider = Arc::new(MockAuthProvider::new());
        let (gate, events) = SessionGate::new(provider.clone());
        (provider, gate, events)
    }

    #[tokio::test]
    async fn sign_in_with_empty_fields_short_circuits() {
        let (provider, gate, _events) = gate();

        let err = gate.sign_in_with_password("", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        let err = gate
            .sign_in_with_password("user@example.com", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));

        assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sign_in_success_returns_authenticated_session() {
        let (provider, gate, _events) = gate();

        let session = gate
            .sign_in_with_password("user@example.com", "secret")
            .await
            .unwrap();

        assert!(session.is_authenticated);
        assert_eq!(session.identity.unwrap().email, "user@example.com");
        assert_eq!(provider.sign_in_calls.load(Ordering::SeqCst), 1);
        // The machine is reactive: only provider notifications transition it.
        assert_eq!(gate.state().await, GateState::Unknown);
    }

    #[tokio::test]
    async fn sign_in_maps_provider_codes() {
        let cases = [
            (ProviderErrorCode::UserNotFound, AuthError::UserNotFound),
            (ProviderErrorCode::WrongPassword, AuthError::WrongPassword),
            (ProviderErrorCode::InvalidEmail, AuthError::InvalidEmail),
        ];

        for (code, expected) in cases {
            let (provider, gate, _events) = gate();
            provider.set_sign_in(Err(ProviderError::new(code, "boom")));

            let err = gate
                .sign_in_with_password("user@example.com", "secret")
                .await
                .unwrap_err();
            assert_eq!(err, expected);
        }

        // Anything outside the closed set collapses to Unknown.
        let (provider, gate, _events) = gate();
        provider.set_sign_in(Err(ProviderError::new(ProviderErrorCode::Network, "down")));
        let err = gate
            .sign_in_with_password("user@example.com", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unknown(_)));
    }

    #[tokio::test]
    async fn sign_up_rejects_short_password_locally() {
        let (provider, gate, _events) = gate();

        let err = gate
            .sign_up_with_password("user@example.com", "abc12", "abc12")
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::PasswordTooShort);
        assert_eq!(provider.sign_up_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sign_up_rejects_mismatch_locally() {
        let (provider, gate, _events) = gate();

        let err = gate
            .sign_up_with_password("user@example.com", "abcdef", "abcdeg")
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::PasswordMismatch);
        assert_eq!(provider.sign_up_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sign_up_rejects_empty_fields_locally() {
        let (provider, gate, _events) = gate();

        let err = gate
            .sign_up_with_password("user@example.com", "abcdef", "")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidInput(_)));
        assert_eq!(provider.sign_up_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sign_up_maps_provider_codes() {
        let cases = [
            (ProviderErrorCode::EmailInUse, AuthError::EmailInUse),
            (ProviderErrorCode::WeakPassword, AuthError::WeakPassword),
            (ProviderErrorCode::InvalidEmail, AuthError::InvalidEmail),
        ];

        for (code, expected) in cases {
            let (provider, gate, _events) = gate();
            provider.set_sign_up(Err(ProviderError::new(code, "boom")));

            let err = gate
                .sign_up_with_password("user@example.com", "abcdef", "abcdef")
                .await
                .unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn popup_blocked_falls_back_to_redirect() {
        let (provider, gate, _events) = gate();
        provider.set_popup(Err(ProviderError::new(
            ProviderErrorCode::PopupBlocked,
            "popup blocked by browser",
        )));

        let outcome = gate
            .sign_in_with_federated(FederatedIntent::Login)
            .await
            .unwrap();

        // Redirect started; the result arrives on the next startup.
        assert!(outcome.is_none());
        assert_eq!(provider.popup_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.redirect_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn popup_closed_by_user_is_cancelled_without_retry() {
        let (provider, gate, _events) = gate();
        provider.set_popup(Err(ProviderError::new(
            ProviderErrorCode::PopupClosedByUser,
            "window closed",
        )));

        let err = gate
            .sign_in_with_federated(FederatedIntent::Signup)
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Cancelled);
        assert_eq!(provider.redirect_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn redirect_result_without_pending_redirect_is_a_noop() {
        let (_provider, gate, mut events) = gate();

        assert!(gate.resolve_redirect_result().await.unwrap().is_none());
        // Idempotent: a second call changes nothing either.
        assert!(gate.resolve_redirect_result().await.unwrap().is_none());

        assert_eq!(gate.state().await, GateState::Unknown);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn notifications_drive_the_machine() {
        let (_provider, gate, mut events) = gate();
        assert_eq!(gate.state().await, GateState::Unknown);
        assert_eq!(gate.screen_mode().await, ScreenMode::AuthPanel);

        gate.apply_notification(Some(identity())).await;
        assert_eq!(gate.state().await, GateState::Authenticated);
        assert_eq!(gate.screen_mode().await, ScreenMode::MainApp);
        assert!(gate.session().await.is_authenticated);
        assert!(matches!(
            events.try_recv().unwrap(),
            GateEvent::ShowMainApp { .. }
        ));

        gate.apply_notification(None).await;
        assert_eq!(gate.state().await, GateState::Unauthenticated);
        assert!(!gate.session().await.is_authenticated);
        assert_eq!(
            events.try_recv().unwrap(),
            GateEvent::ShowAuthPanel {
                clear_credentials: false
            }
        );
    }

    #[tokio::test]
    async fn run_consumes_the_notification_stream() {
        let provider = Arc::new(MockAuthProvider::new());
        let (gate, mut events) = SessionGate::new(provider);
        let gate = Arc::new(gate);

        let (tx, rx) = mpsc::unbounded_channel();
        let runner = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.run(rx).await })
        };

        tx.send(Some(identity())).unwrap();
        tx.send(None).unwrap();
        drop(tx);
        runner.await.unwrap();

        assert_eq!(gate.state().await, GateState::Unauthenticated);
        assert!(matches!(
            events.try_recv().unwrap(),
            GateEvent::ShowMainApp { .. }
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            GateEvent::ShowAuthPanel { .. }
        ));
    }

    #[tokio::test]
    async fn sign_out_swallows_provider_failure_but_still_transitions() {
        let (provider, gate, mut events) = gate();
        provider.set_sign_out(Err(ProviderError::new(
            ProviderErrorCode::Network,
            "provider unreachable",
        )));

        gate.sign_out().await.unwrap();

        assert_eq!(provider.sign_out_calls.load(Ordering::SeqCst), 1);
        assert_eq!(gate.state().await, GateState::Unauthenticated);
        assert_eq!(
            events.try_recv().unwrap(),
            GateEvent::ShowAuthPanel {
                clear_credentials: true
            }
        );
    }
}
