use super::*;

#[tokio::test]
async fn loopback_send_reaches_the_bound_receiver() {
    let receiver = UdpReceiver::bind("127.0.0.1:0").await.expect("bind");
    let addr = receiver.local_addr().expect("local addr");
    let sender = UdpSender::connect(&addr.to_string()).await.expect("connect");

    sender.send(b"W").await.expect("send");

    let (_peer, payload) = receiver
        .receive(Some(Duration::from_secs(2)))
        .await
        .expect("receive")
        .expect("datagram before timeout");
    assert_eq!(payload, b"W");
}

#[tokio::test]
async fn receive_times_out_with_none_when_nothing_arrives() {
    let receiver = UdpReceiver::bind("127.0.0.1:0").await.expect("bind");
    let outcome = receiver
        .receive(Some(Duration::from_millis(50)))
        .await
        .expect("receive");
    assert!(outcome.is_none());
}

#[tokio::test]
async fn oversized_payload_is_rejected_locally() {
    let receiver = UdpReceiver::bind("127.0.0.1:0").await.expect("bind");
    let addr = receiver.local_addr().expect("local addr");
    let sender = UdpSender::connect(&addr.to_string()).await.expect("connect");

    let oversized = vec![0u8; MAX_DATAGRAM_BYTES + 1];
    let error = sender.send(&oversized).await.expect_err("must reject");
    assert!(matches!(
        error,
        TransportError::PayloadTooLarge { len, max }
            if len == MAX_DATAGRAM_BYTES + 1 && max == MAX_DATAGRAM_BYTES
    ));
}

#[tokio::test]
async fn datagram_boundaries_are_preserved() {
    let receiver = UdpReceiver::bind("127.0.0.1:0").await.expect("bind");
    let addr = receiver.local_addr().expect("local addr");
    let sender = UdpSender::connect(&addr.to_string()).await.expect("connect");

    sender.send(b"W").await.expect("first send");
    sender.send(&[b'F', 0x01, 0x2C]).await.expect("second send");

    let (_peer, first) = receiver
        .receive(Some(Duration::from_secs(2)))
        .await
        .expect("receive")
        .expect("first datagram");
    let (_peer, second) = receiver
        .receive(Some(Duration::from_secs(2)))
        .await
        .expect("receive")
        .expect("second datagram");
    assert_eq!(first, b"W");
    assert_eq!(second, &[b'F', 0x01, 0x2C]);
}
