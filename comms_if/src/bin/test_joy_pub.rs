//! Joystick publisher test
//!
//! Publishes a slow sweep of the pitch and yaw axes so the control executable can be exercised
//! without an operator station.

use comms_if::{
    joy::JoystickState,
    net::{MonitoredSocket, SocketOptions},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create zmq context
    let ctx = zmq::Context::new();

    // Create the socket
    let socket = MonitoredSocket::new(
        &ctx,
        zmq::PUB,
        SocketOptions::state_publisher(),
        "tcp://*:5020",
    )?;

    println!("Joystick publisher open on port 5020");

    let mut t = 0f64;

    loop {
        // Triggers rest at 1.0, buttons all released
        let state = JoystickState::new(
            vec![0.0, t.sin(), 1.0, (0.5 * t).sin(), 0.0, 1.0, 0.0, 0.0],
            vec![false; 11],
        );

        let state_str = serde_json::to_string(&state)?;

        match socket.send(&state_str, 0) {
            Ok(_) => println!("Sent axes {:.2?}", state.axes),
            Err(e) => println!("Failed to send joystick state: {}", e),
        }

        t += 0.1;
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
}
