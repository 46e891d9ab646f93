//! Testes de integração para gasmon-olfactory

use std::time::Duration;

use gasmon_core::logging::{DEFAULT_DIRECTIVE, init_tracing};
use gasmon_core::prelude::*;
use gasmon_olfactory::*;

fn mq6_config() -> GasMonitorConfig {
    GasMonitorOptions::new()
        .data_pin("A3")
        .heater_pin("P11")
        .model(SensorModel::Mq6)
        .warmup_ms(30_000)
        .sample_interval_ms(200)
        .start_value(0.0)
        .buffer_len(8)
        .vref(3.3)
        .build_with(MonitorDefaults::BUILTIN)
        .unwrap()
}

#[test]
fn test_full_cycle_on_virtual_loop() {
    let _ = init_tracing(DEFAULT_DIRECTIVE);

    let mut connector = SimulatedConnector::new([100.0, 200.0, 300.0, 400.0]);
    let probe = connector.probe();
    let mut monitor = GasMonitor::connect(mq6_config(), &mut connector).unwrap();
    let mut sched = VirtualScheduler::new();

    monitor.start(&mut sched).unwrap();
    assert_eq!(monitor.state(), MonitorState::Warming);
    assert_eq!(monitor.samples(), vec![0.0; 8]);
    assert_eq!(monitor.average_value().unwrap_err().kind(), ErrorKind::NotWarmedUp);

    sched.advance(Duration::from_secs(30), &mut monitor);
    assert_eq!(monitor.state(), MonitorState::Sampling);

    // 8 ticks preenchem o buffer com 2 voltas do roteiro
    sched.advance_ms(8 * 200, &mut monitor);
    assert_eq!(monitor.average_value().unwrap(), 250.0);
    assert_eq!(monitor.current_value().unwrap(), 400.0);
    assert_eq!(probe.reads(), 8);

    monitor.stop(&mut sched).unwrap();
    assert!(!probe.is_heating());
    assert_eq!(sched.pending(), 0);
    assert_eq!(monitor.current_value().unwrap_err().code(), 11);
}

#[test]
fn test_config_file_to_running_monitor() {
    let cfg = GasMonitorOptions::from_toml_str(
        r#"
        data_pin = "A0"
        heater_pin = "P13"
        model = "MQ4"
        warmup_ms = 500
        sample_interval_ms = 100
        buffer_len = 2
        start_value = 1.0
        "#,
    )
    .unwrap()
    .build_with(MonitorDefaults::BUILTIN)
    .unwrap();

    let mut monitor = GasMonitor::new(cfg, SimulatedMqDriver::new(SensorModel::Mq4, [5000.0]));
    let mut sched = VirtualScheduler::new();
    monitor.start(&mut sched).unwrap();

    sched.advance_ms(600, &mut monitor);
    assert_eq!(monitor.samples(), vec![1.0, 5000.0]);
    assert_eq!(monitor.average_value().unwrap(), 2500.5);
    assert!((ppm_to_percent(monitor.current_value().unwrap()) - 0.5).abs() < 1e-6);
}

#[test]
fn test_validated_config_sizes_buffer() {
    let zero = GasMonitorOptions::new()
        .data_pin("A3")
        .heater_pin("P11")
        .model(SensorModel::Mq6)
        .buffer_len(0)
        .build_with(MonitorDefaults::BUILTIN)
        .unwrap_err();
    assert_eq!(zero.kind(), ErrorKind::InvalidConfiguration);

    let cfg = mq6_config();
    assert_eq!(cfg.buffer_len(), 8);
    assert_eq!(cfg.gas(), GasKind::Lpg);
    assert_eq!(cfg.warmup(), Duration::from_secs(30));
    assert_eq!(cfg.data_pin().name(), "A3");

    let monitor = GasMonitor::new(cfg, SimulatedMqDriver::new(SensorModel::Mq6, [1.0]));
    assert_eq!(monitor.samples().len(), monitor.config().buffer_len());
}

// ═══════════════════════════════════════════════════════════════════════════════
// MONITOR EM TASK (tokio)
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test(start_paused = true)]
async fn test_actor_warmup_and_sampling() {
    let driver = SimulatedMqDriver::new(SensorModel::Mq6, [10.0, 20.0]);
    let probe = driver.probe();
    let (handle, task) = spawn_monitor(GasMonitor::new(mq6_config(), driver));

    assert_eq!(handle.state().await.unwrap(), MonitorState::Stopped);
    assert_eq!(handle.current_value().await, Err(GasMonitorError::NotSampling));

    assert_eq!(handle.start().await.unwrap(), StartOutcome::Started);
    assert_eq!(handle.start().await.unwrap(), StartOutcome::AlreadyRunning);
    assert!(probe.is_heating());
    assert_eq!(handle.current_value().await, Err(GasMonitorError::NotWarmedUp));

    tokio::time::sleep(Duration::from_millis(30_100)).await;
    assert_eq!(handle.state().await.unwrap(), MonitorState::Sampling);
    assert_eq!(handle.current_value().await.unwrap(), 0.0);

    // ticks aos 30.2, 30.4, 30.6, 30.8 e 31.0 s
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(probe.reads(), 5);
    assert_eq!(handle.current_value().await.unwrap(), 10.0);
    assert_eq!(
        handle.samples().await.unwrap(),
        vec![0.0, 0.0, 0.0, 10.0, 20.0, 10.0, 20.0, 10.0]
    );

    assert_eq!(handle.stop().await.unwrap(), StopOutcome::Stopped);
    assert_eq!(handle.stop().await.unwrap(), StopOutcome::AlreadyStopped);
    assert!(!probe.is_heating());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(probe.reads(), 5);

    handle.shutdown();
    let monitor = task.await.unwrap();
    assert_eq!(monitor.samples_taken(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_actor_restart_refills_buffer() {
    let driver = SimulatedMqDriver::new(SensorModel::Mq6, [50.0]);
    let (handle, _task) = spawn_monitor(GasMonitor::new(mq6_config(), driver));

    handle.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(32_000)).await;
    assert_eq!(handle.average_value().await.unwrap(), 50.0);

    handle.stop().await.unwrap();
    handle.start().await.unwrap();
    assert_eq!(handle.samples().await.unwrap(), vec![0.0; 8]);
    assert_eq!(handle.average_value().await, Err(GasMonitorError::NotWarmedUp));
}

#[tokio::test(start_paused = true)]
async fn test_actor_heater_passthrough() {
    let driver = SimulatedMqDriver::new(SensorModel::Mq6, [1.0]);
    let probe = driver.probe();
    let (handle, _task) = spawn_monitor(GasMonitor::new(mq6_config(), driver));

    handle.heater_on().await.unwrap();
    assert!(probe.is_heating());
    handle.heater_off().await.unwrap();
    assert!(!probe.is_heating());
    assert_eq!(handle.state().await.unwrap(), MonitorState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_actor_shutdown_stops_heater() {
    let driver = SimulatedMqDriver::new(SensorModel::Mq6, [1.0]);
    let probe = driver.probe();
    let (handle, task) = spawn_monitor(GasMonitor::new(mq6_config(), driver));

    handle.start().await.unwrap();
    handle.shutdown();
    let monitor = task.await.unwrap();

    assert_eq!(monitor.state(), MonitorState::Stopped);
    assert!(!probe.is_heating());
    assert_eq!(handle.start().await, Err(GasMonitorError::MonitorClosed));
    assert!(handle.is_closed());
}
