use std::net::{IpAddr, Ipv4Addr, TcpListener, TcpStream};
use std::thread;

use zusi3tcp::client::{ClientSession, Subscription};
use zusi3tcp::server::ServerSession;
use zusi3tcp::tcp::Transport;
use zusi3tcp::message::Message;

fn loopback_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind((IpAddr::from(Ipv4Addr::new(127, 0, 0, 1)), 0)).unwrap();
    let addr = listener.local_addr().unwrap();
    let client = thread::spawn(move || TcpStream::connect(addr).unwrap());
    let (server, _) = listener.accept().unwrap();
    (server, client.join().unwrap())
}

#[test]
fn handshake_and_telemetry_round_trip() {
    let (server_stream, client_stream) = loopback_pair();

    let server_thread = thread::spawn(move || {
        let mut server = ServerSession::new(Transport::from_stream(server_stream));
        server.accept().unwrap();
        assert_eq!(server.client_name(), "integration-test");
        server.send_data(&[(1, 11.83), (13, 42.0)]).unwrap();
        server
    });

    let mut client = ClientSession::new(
        Transport::from_stream(client_stream),
        "integration-test".to_string(),
    );
    client
        .connect(Subscription {
            fs: vec![1],
            prog: vec![],
            bedienung: false,
        })
        .unwrap();
    assert_eq!(client.zusi_version(), "3.1.2.0");

    let message = client.receive_message().unwrap();
    match message {
        Message::Telemetry(telemetry) => {
            let speed: f32 = telemetry.get(1).unwrap().unwrap();
            assert!((speed - 11.83).abs() < 0.001);
            // Not subscribed, so the server filtered it out.
            let oberstrom: Option<f32> = telemetry.get(13).unwrap();
            assert_eq!(oberstrom, None);
        }
        other => panic!("expected Telemetry, got {:?}", other),
    }

    server_thread.join().unwrap();
}

#[test]
fn server_rejects_client_that_never_connects() {
    let (server_stream, client_stream) = loopback_pair();
    drop(client_stream);

    let mut server = ServerSession::new(Transport::from_stream(server_stream));
    assert!(server.accept().is_err());
}
