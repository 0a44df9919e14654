//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements      | Connects to                    |
//! |--------------|-----------------|--------------------------------|
//! | `advertiser` | AdvertiserPort  | Bluedroid GAP advertising      |
//! | `display`    | DisplayPort     | ST7789 LCD (embedded-graphics) |
//! | `log_sink`   | EventSink       | Serial log output              |
//! | `time`       | ClockPort       | ESP32 system timer             |

pub mod advertiser;
pub mod display;
pub mod log_sink;
pub mod time;
