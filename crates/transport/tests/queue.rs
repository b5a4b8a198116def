use std::convert::Infallible;

use tuya_leds_app::{DeviceConfig, PipelineError, RenderMode, VirtualDevice};
use tuya_leds_core::{Frame, Milliseconds, RGB8};
use tuya_leds_transport::{
    tokio::{channel, QueuedTransport},
    FrameSink, DEFAULT_QUEUE_LEN,
};

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Frame>,
}

impl FrameSink for RecordingSink {
    type Error = Infallible;

    async fn send_frame(&mut self, frame: Frame) -> Result<(), Self::Error> {
        self.frames.push(frame);
        Ok(())
    }
}

/// Fails to deliver the first `failures` frames.
#[derive(Default)]
struct FlakySink {
    failures: usize,
    frames: Vec<Frame>,
}

impl FrameSink for FlakySink {
    type Error = &'static str;

    async fn send_frame(&mut self, frame: Frame) -> Result<(), Self::Error> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err("device is offline");
        }
        self.frames.push(frame);
        Ok(())
    }
}

fn device(transport: QueuedTransport, custom_led_count: i32) -> VirtualDevice<QueuedTransport> {
    let _ = env_logger::try_init();

    let config = DeviceConfig {
        device_id: "bf0123456789abcdef".to_owned(),
        access_id: "access".to_owned(),
        access_key: "secret".to_owned(),
        custom_led_count,
        ..DeviceConfig::default()
    };
    VirtualDevice::new(config, transport, &mut ()).unwrap()
}

fn red() -> RenderMode<'static> {
    RenderMode::Forced(RGB8::new(255, 0, 0))
}

#[tokio::test]
async fn test_frames_are_forwarded_in_order() {
    let (transport, forwarder) = channel(DEFAULT_QUEUE_LEN);
    let mut device = device(transport, 1);

    let first = device.render(red(), Milliseconds(0)).unwrap().unwrap();
    let second = device.render(red(), Milliseconds(100)).unwrap().unwrap();
    let off = device.shutdown(Milliseconds(110)).unwrap();
    // Dropping the device closes the queue.
    drop(device);

    let sink = forwarder.run(RecordingSink::default()).await;
    assert_eq!(sink.frames, [first, second, off]);
    assert_eq!(sink.frames[2].as_str(), "0000000000000100");
}

#[tokio::test]
async fn test_full_queue_drops_frames() {
    let (transport, forwarder) = channel(2);
    let mut device = device(transport, 4);

    let sent = (0..5_u64)
        .filter_map(|tick| device.render(red(), Milliseconds(tick * 100)).unwrap())
        .count();
    assert_eq!(sent, 2);
    drop(device);

    let sink = forwarder.run(RecordingSink::default()).await;
    assert_eq!(sink.frames.len(), 2);
}

#[tokio::test]
async fn test_closed_queue_is_reported() {
    let (transport, forwarder) = channel(DEFAULT_QUEUE_LEN);
    drop(forwarder);

    let mut device = device(transport, 4);
    assert_eq!(
        device.render(red(), Milliseconds(0)),
        Err(PipelineError::Transport)
    );
    assert_eq!(
        device.shutdown(Milliseconds(10)),
        Err(PipelineError::Transport)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_forwarder_runs_alongside_renders() {
    let (transport, forwarder) = channel(DEFAULT_QUEUE_LEN);
    let handle = tokio::spawn(forwarder.run(RecordingSink::default()));

    let mut device = device(transport, 8);
    for tick in 0..3_u64 {
        device.render(red(), Milliseconds(tick * 60)).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    device.shutdown(Milliseconds(1_000)).unwrap();
    drop(device);

    let sink = handle.await.unwrap();
    assert_eq!(sink.frames.len(), 4);
    assert!(sink.frames[3].as_str()[4..100].bytes().all(|b| b == b'0'));
}

#[tokio::test]
async fn test_delivery_failures_are_skipped() {
    let (transport, forwarder) = channel(DEFAULT_QUEUE_LEN);
    let mut device = device(transport, 2);

    device.render(red(), Milliseconds(0)).unwrap();
    let second = device.render(red(), Milliseconds(100)).unwrap().unwrap();
    let off = device.shutdown(Milliseconds(110)).unwrap();
    drop(device);

    let sink = forwarder
        .run(FlakySink {
            failures: 1,
            ..FlakySink::default()
        })
        .await;
    assert_eq!(sink.frames, [second, off]);
}

#[tokio::test]
async fn test_shutdown_fits_into_full_queue() {
    let (transport, forwarder) = channel(1);
    let mut device = device(transport, 4);

    let first = device.render(red(), Milliseconds(0)).unwrap().unwrap();
    assert_eq!(device.render(red(), Milliseconds(100)).unwrap(), None);
    // The forwarder is not running yet, so a blocking send would never return.
    let off = device.shutdown(Milliseconds(110)).unwrap();
    assert_eq!(
        device.shutdown(Milliseconds(120)),
        Err(PipelineError::TransportBusy)
    );
    drop(device);

    let sink = forwarder.run(RecordingSink::default()).await;
    assert_eq!(sink.frames, [first, off]);
    assert!(sink.frames[1].as_str()[4..52].bytes().all(|b| b == b'0'));
}
