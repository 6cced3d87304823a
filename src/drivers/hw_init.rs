//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC channel, GPIO directions, and pull-ups using raw
//! ESP-IDF sys calls. Called once from `main()` before the control
//! loop starts. The small read/write helpers below are the only GPIO
//! surface the sensor and relay drivers use.

use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::Error;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the control loop;
    // single-threaded at this point.
    unsafe {
        init_adc()?;
        init_gpio()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<()> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("ADC1 unit init failed"));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: pins::PH_ADC_ATTEN as adc_atten_t,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(ADC1_HANDLE, pins::PH_ADC_CHANNEL as adc_channel_t, &chan_cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(Error::Init("ADC1 channel config failed"));
    }
    Ok(())
}

/// Read the given ADC1 channel (blocking oneshot conversion).
/// Returns 0 if the conversion fails — full-shade on the LDR proxy.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: handle initialised in init_adc(); reads are confined to
    // the single control-loop thread.
    let ret = unsafe { adc_oneshot_read(ADC1_HANDLE, channel as adc_channel_t, &mut raw) };
    if ret == ESP_OK as i32 {
        raw.clamp(0, 4095) as u16
    } else {
        0
    }
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio() -> Result<()> {
    // Nutrient contacts and the DHT data line: inputs with pull-up.
    let input_cfg = gpio_config_t {
        pin_bit_mask: (1u64 << pins::PHOSPHORUS_BTN_GPIO)
            | (1u64 << pins::POTASSIUM_BTN_GPIO)
            | (1u64 << pins::DHT_DATA_GPIO),
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    if unsafe { gpio_config(&input_cfg) } != ESP_OK as i32 {
        return Err(Error::Init("input GPIO config failed"));
    }

    // Pump relay: plain output, driven low before anything else runs.
    let relay_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::PUMP_RELAY_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    if unsafe { gpio_config(&relay_cfg) } != ESP_OK as i32 {
        return Err(Error::Init("relay GPIO config failed"));
    }
    unsafe { gpio_set_level(pins::PUMP_RELAY_GPIO, 0) };
    Ok(())
}

/// Read a GPIO level. `true` = high.
#[cfg(target_os = "espidf")]
pub fn gpio_read(gpio: i32) -> bool {
    unsafe { gpio_get_level(gpio) != 0 }
}

/// Drive a GPIO level. `true` = high.
#[cfg(target_os = "espidf")]
pub fn gpio_write(gpio: i32, high: bool) {
    unsafe {
        gpio_set_level(gpio, u32::from(high));
    }
}

/// Reconfigure a pin as a plain input (pull-up stays as configured).
#[cfg(target_os = "espidf")]
pub fn gpio_set_input(gpio: i32) {
    unsafe {
        gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_INPUT);
    }
}

/// Reconfigure a pin as an open-drain output (DHT start pulse).
#[cfg(target_os = "espidf")]
pub fn gpio_set_output_od(gpio: i32) {
    unsafe {
        gpio_set_direction(gpio, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
    }
}

/// Busy-wait for `us` microseconds (DHT bit timing).
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    unsafe {
        esp_rom_delay_us(us);
    }
}

// ── Host simulation stubs ─────────────────────────────────────
//
// The sensor drivers read their own simulation atomics on the host, so
// these exist only so relay.rs and main-path code links everywhere.

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_gpio: i32) -> bool {
    true // pulled-up idle level
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_gpio: i32, _high: bool) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_init_succeeds() {
        assert!(init_peripherals().is_ok());
    }
}
