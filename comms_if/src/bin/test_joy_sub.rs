//! Joystick subscriber test

use comms_if::{
    joy::JoystickState,
    net::{MonitoredSocket, SocketOptions},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create context
    let ctx = zmq::Context::new();

    // Block on this socket so we see every state
    let socket_options = SocketOptions {
        recv_timeout: -1,
        ..SocketOptions::state_subscriber()
    };

    // Create socket
    let socket = MonitoredSocket::new(&ctx, zmq::SUB, socket_options, "tcp://localhost:5020")?;

    // Joystick states have no topic prefix, so subscribe to everything
    socket.set_subscribe(b"")?;

    // Recieve messages from publisher
    loop {
        let msg = socket.recv_msg(0)?;

        match msg
            .as_str()
            .map(|s| serde_json::from_str::<JoystickState>(s))
        {
            Some(Ok(state)) => println!(
                "{}: axes {:.2?}, buttons {:?}",
                state.timestamp, state.axes, state.buttons
            ),
            Some(Err(e)) => println!("Invalid joystick state: {}", e),
            None => println!("Received non UTF-8 data"),
        }
    }
}
