#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::RNG;
use embassy_stm32::rng::Rng;
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{Uart, UartRx, UartTx};
use embassy_stm32::{bind_interrupts, peripherals, rng, usart};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};
use cortex_m_semihosting::hprintln;

use nucleo_f767zi::config::TransmitterConfig;
use nucleo_f767zi::readings::RandomReadings;
use nucleo_f767zi::transmitter::Transmitter;
use nucleo_f767zi::uart::log_radio_replies;
use nucleo_f767zi::{log_warn, setup_usart_developer_console, setup_usart_radio};

bind_interrupts!(struct Irqs {
    USART2 => usart::InterruptHandler<peripherals::USART2>;
    USART3 => usart::InterruptHandler<peripherals::USART3>;
    RNG => rng::InterruptHandler<peripherals::RNG>;
});

#[embassy_executor::task]
async fn beacon(usart_tx: UartTx<'static, Async>, rng: Rng<'static, RNG>) {
    let mut transmitter = Transmitter::new(
        usart_tx,
        RandomReadings::new(rng),
        Delay,
        TransmitterConfig::default(),
    );
    transmitter.run().await;
}

#[embassy_executor::task]
async fn radio_reply_logger(usart_rx: UartRx<'static, Async>, console: Uart<'static, Async>) {
    log_radio_replies(usart_rx, console).await;
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // the RNG needs the 48 MHz clock, derive it from the ST-Link 8 MHz MCO
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 216 MHz sysclk
            divq: Some(PllQDiv::DIV9), // 48 MHz
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.mux.clk48sel = mux::Clk48sel::PLL1_Q;
    }
    let p = embassy_stm32::init(config);

    hprintln!("Hello, radio beacon!");

    // start developer usart
    let mut console = setup_usart_developer_console!(p, Irqs);
    if console.write(b"Radio beacon started, transmitting on USART2.\r\n").await.is_err() {
        log_warn!("developer console not writable");
    }

    let radio = setup_usart_radio!(p, Irqs);
    let (radio_tx, radio_rx) = radio.split();
    let rng = Rng::new(p.RNG, Irqs);

    // the console lives on in the reply logger, dropping it would disable USART3
    spawner.spawn(radio_reply_logger(radio_rx, console)).unwrap();
    spawner.spawn(beacon(radio_tx, rng)).unwrap();
}
