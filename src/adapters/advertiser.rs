//! Bluedroid BLE advertiser adapter.
//!
//! Implements [`AdvertiserPort`], the hexagonal boundary for raw,
//! connectionless BLE advertising.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: Bluedroid GAP via `esp_idf_svc::sys`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Advertising parameters
//!
//! | Parameter      | Value                                  |
//! |----------------|----------------------------------------|
//! | Type           | `ADV_NONCONN_IND` (no connections)     |
//! | Channels       | 37, 38, 39                             |
//! | Interval       | configurable, default 0x20..0x40       |
//! | Payload        | raw AD structures from [`Identity`]    |

use log::info;

use crate::app::ports::AdvertiserPort;
use crate::error::HardwareError;
use crate::identity::{AdvData, Identity};

#[cfg(target_os = "espidf")]
use log::warn;

/// `ESP_ERR_INVALID_ARG`, used for locally rejected parameters.
const ERR_INVALID_ARG: i32 = 0x102;

// ───────────────────────────────────────────────────────────────
// Advertiser state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertiserState {
    Uninitialized,
    Stopped,
    Advertising,
}

pub struct BleAdvertiser {
    state: AdvertiserState,
    interval_min: u16,
    interval_max: u16,
    payload: AdvData,
}

impl Default for BleAdvertiser {
    fn default() -> Self {
        Self::new()
    }
}

impl BleAdvertiser {
    pub fn new() -> Self {
        Self {
            state: AdvertiserState::Uninitialized,
            interval_min: 0x20,
            interval_max: 0x40,
            payload: AdvData::new(),
        }
    }

    pub fn state(&self) -> AdvertiserState {
        self.state
    }

    /// Raw advertising data currently installed.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn interval_bounds(&self) -> (u16, u16) {
        (self.interval_min, self.interval_max)
    }

    fn ensure_initialized(&self) -> Result<(), HardwareError> {
        if self.state == AdvertiserState::Uninitialized {
            Err(HardwareError::NotInitialized)
        } else {
            Ok(())
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_init(&mut self) -> Result<(), HardwareError> {
        use esp_idf_svc::sys::*;
        // SAFETY: Called once from the main task during startup; the
        // Bluedroid host owns its memory after enable.
        unsafe {
            // Release classic BT memory (BLE-only mode saves ~30 KB).
            esp_bt_controller_mem_release(esp_bt_mode_t_ESP_BT_MODE_CLASSIC_BT);

            let mut bt_cfg = esp_bt_controller_config_t::default();
            let ret = esp_bt_controller_init(&mut bt_cfg);
            if ret != ESP_OK as i32 {
                return Err(HardwareError::StackInit(ret));
            }

            let ret = esp_bt_controller_enable(esp_bt_mode_t_ESP_BT_MODE_BLE);
            if ret != ESP_OK as i32 {
                return Err(HardwareError::StackInit(ret));
            }

            let ret = esp_bluedroid_init();
            if ret != ESP_OK as i32 {
                return Err(HardwareError::StackInit(ret));
            }

            let ret = esp_bluedroid_enable();
            if ret != ESP_OK as i32 {
                return Err(HardwareError::StackInit(ret));
            }

            let ret = esp_ble_gap_register_callback(Some(ble_gap_event_handler));
            if ret != ESP_OK as i32 {
                return Err(HardwareError::StackInit(ret));
            }
        }
        info!("BLE(espidf): Bluedroid stack initialized (advertiser only)");
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_init(&mut self) -> Result<(), HardwareError> {
        info!("BLE(sim): stack initialized");
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_set_payload(&mut self) -> Result<(), HardwareError> {
        use esp_idf_svc::sys::*;
        // SAFETY: Bluedroid copies the buffer before the call returns.
        let ret = unsafe {
            esp_ble_gap_config_adv_data_raw(self.payload.as_ptr() as *mut u8, self.payload.len() as u32)
        };
        if ret != ESP_OK as i32 {
            return Err(HardwareError::Payload(ret));
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_set_payload(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) -> Result<(), HardwareError> {
        use esp_idf_svc::sys::*;
        // SAFETY: params are copied by Bluedroid; main task only.
        let ret = unsafe {
            let mut adv_params = esp_ble_adv_params_t {
                adv_int_min: self.interval_min,
                adv_int_max: self.interval_max,
                adv_type: esp_ble_adv_type_t_ADV_TYPE_NONCONN_IND,
                own_addr_type: esp_ble_addr_type_t_BLE_ADDR_TYPE_PUBLIC,
                channel_map: esp_ble_adv_channel_t_ADV_CHNL_ALL,
                adv_filter_policy: esp_ble_adv_filter_t_ADV_FILTER_ALLOW_SCAN_ANY_CON_ANY,
                ..core::mem::zeroed()
            };
            esp_ble_gap_start_advertising(&mut adv_params)
        };
        if ret != ESP_OK as i32 {
            return Err(HardwareError::Start(ret));
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_stop(&mut self) -> Result<(), HardwareError> {
        use esp_idf_svc::sys::*;
        // SAFETY: stopping an idle advertiser is accepted by Bluedroid.
        let ret = unsafe { esp_ble_gap_stop_advertising() };
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HardwareError::Stop(ret));
        }
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_stop(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn ble_gap_event_handler(
    event: esp_idf_svc::sys::esp_gap_ble_cb_event_t,
    param: *mut esp_idf_svc::sys::esp_ble_gap_cb_param_t,
) {
    use esp_idf_svc::sys::*;
    match event {
        esp_gap_ble_cb_event_t_ESP_GAP_BLE_ADV_DATA_RAW_SET_COMPLETE_EVT => {
            let status = unsafe { (*param).adv_data_raw_cmpl.status };
            if status != esp_bt_status_t_ESP_BT_STATUS_SUCCESS {
                warn!("BLE GAP: raw adv data rejected (status={})", status);
            }
        }
        esp_gap_ble_cb_event_t_ESP_GAP_BLE_ADV_START_COMPLETE_EVT => {
            let status = unsafe { (*param).adv_start_cmpl.status };
            if status != esp_bt_status_t_ESP_BT_STATUS_SUCCESS {
                warn!("BLE GAP: advertising start failed (status={})", status);
            }
        }
        esp_gap_ble_cb_event_t_ESP_GAP_BLE_ADV_STOP_COMPLETE_EVT => {
            log::debug!("BLE GAP: advertising stopped");
        }
        _ => {}
    }
}

// ───────────────────────────────────────────────────────────────
// AdvertiserPort implementation
// ───────────────────────────────────────────────────────────────

impl AdvertiserPort for BleAdvertiser {
    fn init(&mut self) -> Result<(), HardwareError> {
        if self.state != AdvertiserState::Uninitialized {
            return Ok(());
        }
        self.platform_init()?;
        self.state = AdvertiserState::Stopped;
        Ok(())
    }

    fn set_interval_bounds(&mut self, min: u16, max: u16) -> Result<(), HardwareError> {
        if min > max || min < 0x20 || max > 0x4000 {
            return Err(HardwareError::IntervalConfig(ERR_INVALID_ARG));
        }
        self.interval_min = min;
        self.interval_max = max;
        info!("BLE: advertising interval {}..{} (x0.625ms)", min, max);
        Ok(())
    }

    fn set_payload(&mut self, identity: &Identity) -> Result<(), HardwareError> {
        self.ensure_initialized()?;
        self.payload = identity.encode_adv_data()?;
        self.platform_set_payload()
    }

    fn start(&mut self) -> Result<(), HardwareError> {
        self.ensure_initialized()?;
        self.platform_start()?;
        self.state = AdvertiserState::Advertising;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        if self.state != AdvertiserState::Advertising {
            return Ok(());
        }
        self.platform_stop()?;
        self.state = AdvertiserState::Stopped;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
