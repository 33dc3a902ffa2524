// On-device check of the pixel buffer against a real RMT channel.
//
// Runs the same sequence for an RGB and an RGBW buffer; the channel is
// released after each run whether or not it passed.

#[cfg(target_os = "espidf")]
use anyhow::ensure;
#[cfg(target_os = "espidf")]
use esp_idf_hal::peripherals::Peripherals;

#[cfg(target_os = "espidf")]
use neopixel::board;
#[cfg(target_os = "espidf")]
use neopixel::config::PixelsConfig;
#[cfg(target_os = "espidf")]
use neopixel::ws2812::{Assignment, Colour, PixelRange, Pixels, PulseOutput, RmtOutput};

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Starting self test...");

    let config = PixelsConfig::default();
    let mut peripherals = Peripherals::take()?;
    let mut pin = board::output_pin(peripherals.pins, config.pin)?;

    for channels in [3, 4] {
        let output = RmtOutput::new(
            &mut peripherals.rmt.channel0,
            &mut pin,
            config.clock_divider()?,
        )?;
        let mut pixels = Pixels::new(output, 5, channels, config.timing()?)?;
        match check(&mut pixels) {
            Ok(()) => log::info!(">> {channels} channels: OK"),
            Err(e) => {
                log::error!(">> {channels} channels: {e}");
                return Err(e);
            }
        }
    }
    log::info!("Self test passed");
    Ok(())
}

#[cfg(target_os = "espidf")]
fn check<O: PulseOutput>(pixels: &mut Pixels<O>) -> anyhow::Result<()> {
    let n = pixels.channels();
    let colour = |c: &[u8]| Colour::from_slice(&c[..n]);
    let off = Colour::off(n)?;
    let (c1, c2) = (colour(&[1, 2, 3, 4])?, colour(&[1, 3, 5, 7])?);
    let (a, b) = (colour(&[1, 1, 1, 1])?, colour(&[2, 2, 2, 2])?);

    ensure!(pixels.len() == 5);
    ensure!(pixels.iter().all(|c| *c == off));

    let old_train = pixels.pulse_train(0)?.to_vec();
    pixels.set(0, c1.clone())?;
    ensure!(*pixels.get(0)? == c1);
    ensure!(pixels.pulse_train(0)? != old_train.as_slice());
    ensure!(pixels.get_range(0..1)? == [c1.clone()]);
    ensure!(pixels.get_range(0..2)? == [c1, off.clone()]);

    pixels.set_range(0..1, Assignment::Broadcast(c2.clone()))?;
    ensure!(pixels.get_range(0..2)? == [c2, off]);

    pixels.set_range(0..4, Assignment::Sequence(vec![a.clone(), b.clone()]))?;
    ensure!(pixels.get_range(PixelRange::from(0..4))? == [a.clone(), b.clone(), a, b]);

    pixels.write()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("self_test must run on an ESP-IDF target")
}
