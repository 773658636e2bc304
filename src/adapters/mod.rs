//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements            | Connects to                 |
//! |---------------|-----------------------|-----------------------------|
//! | `config_file` | ConfigPort            | JSON file on disk           |
//! | `csv_store`   | LogStorePort          | CSV files under a root dir  |
//! | `display`     | DisplayPort           | `log` output                |
//! | `log_sink`    | EventSink             | `log` output                |
//! | `sim`         | OutputPin, ServoPort  | Simulated relays and servo  |
//! |               | SensorPort, ClockPort | Simulated chamber           |
//! | `time`        | ClockPort, DelayNs    | `std::time`, `std::thread`  |

pub mod config_file;
pub mod csv_store;
pub mod display;
pub mod log_sink;
pub mod sim;
pub mod time;
