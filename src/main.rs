#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::AnyOutputPin;
#[cfg(target_os = "espidf")]
use esp_idf_hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_hal::peripherals::Peripherals;
#[cfg(target_os = "espidf")]
use esp_idf_hal::rmt::RmtChannel;

#[cfg(target_os = "espidf")]
use std::time::{Duration, Instant};

#[cfg(target_os = "espidf")]
use neopixel::board;
#[cfg(target_os = "espidf")]
use neopixel::config::PixelsConfig;
#[cfg(target_os = "espidf")]
use neopixel::ws2812::{Colour, MAX_CHANNELS};

#[cfg(target_os = "espidf")]
const RAINBOW_STEPS: usize = 32;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    esp_idf_hal::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!(
        "Started... [{} {}/{} {}]",
        env!("BUILD_TS"),
        env!("BUILD_BRANCH"),
        env!("BUILD_HASH"),
        env!("BUILD_PROFILE")
    );

    let config = load_config()?;
    log::info!("Config: {config:?}");

    let peripherals = Peripherals::take()?;

    let pin = board::output_pin(peripherals.pins, config.pin)?;

    match config.rmt_channel {
        0 => run(peripherals.rmt.channel0, pin, &config),
        1 => run(peripherals.rmt.channel1, pin, &config),
        n => anyhow::bail!("Unsupported RMT channel: {n}"),
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("neopixel must be built for an ESP-IDF target")
}

#[cfg(target_os = "espidf")]
fn load_config() -> anyhow::Result<PixelsConfig> {
    match option_env!("PIXELS_CONFIG") {
        Some(json) => PixelsConfig::from_json(json),
        None => Ok(PixelsConfig::default()),
    }
}

#[cfg(target_os = "espidf")]
fn run<C: RmtChannel>(
    channel: impl Peripheral<P = C> + 'static,
    pin: AnyOutputPin,
    config: &PixelsConfig,
) -> anyhow::Result<()> {
    use neopixel::ws2812::{Pixels, RmtOutput};

    let output = RmtOutput::new(channel, pin, config.clock_divider()?)?;
    let mut pixels = Pixels::new(output, config.pixel_count, config.channels, config.timing()?)?;
    pixels.fill(Colour::off(config.channels)?)?;
    pixels.write()?;

    let mut palette = rainbow(RAINBOW_STEPS, config.channels)?;
    let delay = Duration::from_millis(config.frame_delay_ms);

    loop {
        palette.rotate_right(1);
        let start = Instant::now();
        pixels.set_range(.., palette.clone())?;
        let update = start.elapsed();
        // A failed frame is corrected by the next write
        if let Err(e) = pixels.write() {
            log::error!("Write failed: {e}");
        }
        log::debug!("update {:?} / write {:?}", update, start.elapsed() - update);
        std::thread::sleep(delay);
    }
}

// Red -> green -> blue -> red ramp at half brightness, extra channels off
#[cfg(target_os = "espidf")]
fn rainbow(steps: usize, channels: usize) -> anyhow::Result<Vec<Colour>> {
    (0..steps)
        .map(|i| {
            let pos = i * 3 * 128 / steps;
            let f = (pos % 128) as u8;
            let rgb = match pos / 128 {
                0 => [127 - f, f, 0],
                1 => [0, 127 - f, f],
                _ => [f, 0, 127 - f],
            };
            let mut c = [0_u8; MAX_CHANNELS];
            c[..3].copy_from_slice(&rgb);
            Ok(Colour::from_slice(&c[..channels.min(MAX_CHANNELS)])?)
        })
        .collect()
}
