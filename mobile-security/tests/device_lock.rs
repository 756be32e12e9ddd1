use futures_util::FutureExt;
use matches::assert_matches;

use mobile_security::bridge::{BridgeError, LockState, NativeBridge};
use mobile_security::{
    CheckError, DeviceLockCheck, SecurityCheck, SecurityCheckResult, SecurityService,
};
use mobile_security_test_utils::{ready_bridge, ScriptedPinCheck, TestCheck, TestMetricsPublisher};

#[tokio::test]
async fn passes_when_plugin_reports_lock() {
    let plugin = ScriptedPinCheck::configured();
    let (trigger, bridge) = ready_bridge(Some(plugin.clone()));
    trigger.fire();

    let result = DeviceLockCheck::new(bridge).check().await.unwrap();

    assert_eq!(result, SecurityCheckResult::new("Device Lock Check", true));
    assert_eq!(plugin.queries(), 1);
}

#[tokio::test]
async fn fails_when_plugin_reports_no_lock() {
    let (trigger, bridge) = ready_bridge(Some(ScriptedPinCheck::not_configured()));
    trigger.fire();

    let result = DeviceLockCheck::new(bridge).check().await.unwrap();

    assert_eq!(result, SecurityCheckResult::new("Device Lock Check", false));
}

#[tokio::test]
async fn rejects_without_host_context() {
    let plugin = ScriptedPinCheck::configured();
    let check = DeviceLockCheck::new(NativeBridge::unavailable().with_pin_check(plugin.clone()));

    let result = check.check().now_or_never();

    assert_matches!(result, Some(Err(CheckError::EnvironmentUnavailable)));
    assert_eq!(plugin.queries(), 0);
}

#[tokio::test]
async fn rejects_when_plugin_is_missing() {
    let (trigger, bridge) = ready_bridge(None);
    trigger.fire();

    let err = DeviceLockCheck::new(bridge).check().await.unwrap_err();

    assert_matches!(err, CheckError::PluginNotFound(_));
    assert_eq!(err.to_string(), "could not find plugin PinCheck");
}

#[tokio::test]
async fn rejects_when_plugin_never_answers() {
    let (trigger, bridge) = ready_bridge(Some(ScriptedPinCheck::silent()));
    trigger.fire();

    let err = DeviceLockCheck::new(bridge).check().await.unwrap_err();

    assert_matches!(err, CheckError::Bridge(BridgeError::CallbackDropped));
}

#[tokio::test]
async fn does_not_query_plugin_before_device_ready() {
    let plugin = ScriptedPinCheck::configured();
    let (trigger, bridge) = ready_bridge(Some(plugin.clone()));
    let check = DeviceLockCheck::new(bridge);

    let pending = check.check();
    futures_util::pin_mut!(pending);
    assert!((&mut pending).now_or_never().is_none());
    assert_eq!(plugin.queries(), 0);

    trigger.fire();
    let result = pending.await.unwrap();

    assert!(result.passed());
    assert_eq!(plugin.queries(), 1);
}

#[tokio::test]
async fn checks_sharing_one_bridge_all_see_readiness() {
    let (trigger, bridge) = ready_bridge(Some(ScriptedPinCheck::new(Some(LockState::Configured))));
    let first = DeviceLockCheck::new(bridge.clone());
    let second = DeviceLockCheck::new(bridge);
    let service = SecurityService::without_metrics();

    let checks: [&dyn SecurityCheck; 2] = [&first, &second];
    let batch = service.check_many(&checks);
    futures_util::pin_mut!(batch);
    assert!((&mut batch).now_or_never().is_none());

    trigger.fire();
    let results = batch.await.unwrap();

    assert!(results.iter().all(SecurityCheckResult::passed));
}

#[tokio::test]
async fn device_lock_metric_is_published_with_other_checks() {
    let (trigger, bridge) = ready_bridge(Some(ScriptedPinCheck::not_configured()));
    trigger.fire();
    let publisher = TestMetricsPublisher::new();
    let service = SecurityService::with_metrics(publisher.clone());

    let metrics = service
        .check_many_and_publish_metric(&[
            &DeviceLockCheck::new(bridge),
            &TestCheck::passing("Root Check"),
        ])
        .await
        .unwrap();

    assert_eq!(metrics[0].id(), "DeviceLockCheck");
    assert!(!metrics[0].passed());
    assert_eq!(metrics[1].id(), "RootCheck");
    assert_eq!(publisher.calls().len(), 1);
}
