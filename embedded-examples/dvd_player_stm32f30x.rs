//! Full example code for driving the front panel of a DVD player salvaged for its PT6312 and
//! 4-grid VFD. This runs on an STM32F303RE, with PA5 for the clock, PA6 (open-drain, pulled up
//! on the panel) for data, and PA8 for the strobe.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate pt6312;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use pt6312 as vfd;
use vfd::presets::dvd_icons;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the panel is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    let clk = gpioa
        .pa5
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);
    let strobe = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // The data line is shared by both directions. As an open-drain output it can be released
    // high and read back while the controller drives key data onto it.
    let data = gpioa
        .pa6
        .into_open_drain_output(&mut gpioa.moder, &mut gpioa.otyper);

    // Create the BitBangInterface and Display.
    let iface = vfd::BitBangInterface::new(
        strobe,
        clk,
        vfd::OpenDrainDataLine::new(data),
        delay,
    )
    .unwrap();
    let mut disp = vfd::Display::new(
        iface,
        vfd::presets::dvd_player(),
        vfd::Config::new().brightness(5).scroll_page_ms(300),
    )
    .unwrap();

    // Wait out the controller's power-up time and initialize it.
    disp.init().unwrap();
    disp.clear().unwrap();

    disp.set_icon(dvd_icons::DVD).unwrap();
    disp.set_icon(dvd_icons::PLAY).unwrap();
    disp.home().unwrap();
    disp.scroll_text("HELLO 0123456789", |_| {}).unwrap();

    // Show a running counter next to the spinner; stop it when the first key is pressed.
    let mut count = 0;
    loop {
        if disp.busy_spinner().unwrap() {
            disp.write_int_at(count, 4, 3, true).unwrap();
            count = (count + 1) % 10_000;
        }
        if disp.first_pressed_key().unwrap() != 0 {
            break;
        }
    }
    disp.set_leds(0b0001).unwrap();

    loop {
        asm::wfi();
    }
}
