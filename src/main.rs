#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

// https://dev.to/theembeddedrustacean/embedded-rust-embassy-gpio-button-controlled-blinking-3ee6
// https://www.youtube.com/watch?v=dab_vzVDr_M

#[cfg(target_os = "none")]
mod io;

#[cfg(target_os = "none")]
mod firmware {
    use crate::io::{self, Button, LampPins, PwmBuzzer, SampledPot, SerialSink};
    use crossing::config::BUZZER_HZ;
    use crossing::{Board, Controller, ControllerConfig};
    use defmt::info;
    use embassy_executor::Spawner;
    use embassy_futures::yield_now;
    use embassy_stm32::adc::{self, Adc};
    use embassy_stm32::exti::{Channel, ExtiInput};
    use embassy_stm32::gpio::{Level, Output, OutputType, Pin, Pull, Speed};
    use embassy_stm32::time::hz;
    use embassy_stm32::timer::low_level::CountingMode;
    use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
    use embassy_stm32::usart::{Config, Uart};
    use embassy_stm32::{bind_interrupts, peripherals, usart};
    use embassy_time::Instant;
    use {defmt_rtt as _, panic_halt as _};

    pub async fn run(spawner: Spawner) -> ! {
        let peripherals = embassy_stm32::init(Default::default());
        info!("traffic light starting");

        bind_interrupts!(struct Irqs {
            USART1 => usart::InterruptHandler<peripherals::USART1>;
            ADC1_2 => adc::InterruptHandler<peripherals::ADC1>;
        });
        let usart = Uart::new(
            peripherals.USART1,
            peripherals.PA10,
            peripherals.PA9,
            Irqs,
            peripherals.DMA1_CH4,
            peripherals.DMA1_CH5,
            Config::default(), // 115200 baud
        )
        .unwrap();
        spawner.spawn(io::log_task(usart)).unwrap();

        let lamps = LampPins::new(
            Output::new(peripherals.PB10.degrade(), Level::Low, Speed::Low),
            Output::new(peripherals.PB12.degrade(), Level::Low, Speed::Low),
            Output::new(peripherals.PB14.degrade(), Level::Low, Speed::Low),
        );

        let button = Button::new(ExtiInput::new(
            peripherals.PE11.degrade(),
            peripherals.EXTI11.degrade(),
            Pull::Up,
        ));

        let pwm = SimplePwm::new(
            peripherals.TIM1,
            Some(PwmPin::new_ch1(peripherals.PA8, OutputType::PushPull)),
            None,
            None,
            None,
            hz(BUZZER_HZ),
            CountingMode::EdgeAlignedUp,
        );

        let mut adc = Adc::new(peripherals.ADC1);
        let mut potentiometer = peripherals.PA0;

        let board = Board {
            lamps,
            button,
            analog: SampledPot::default(),
            tone: PwmBuzzer::new(pwm),
            sink: SerialSink,
        };
        let config = ControllerConfig::from_features();
        let mut controller = Controller::new(config, board, Instant::now().as_millis()).unwrap();
        info!("controller running, {} intervals", config.policy.name());

        loop {
            if config.policy.is_dynamic() {
                let raw = adc.read(&mut potentiometer).await;
                controller.analog_mut().set_raw(raw);
            }
            controller.tick(Instant::now().as_millis());
            // let the serial log task drain between ticks
            yield_now().await;
        }
    }
}

#[cfg(target_os = "none")]
#[embassy_executor::main]
async fn main(spawner: embassy_executor::Spawner) {
    firmware::run(spawner).await
}

// The controller logic lives in the library and is tested on the host; the
// firmware itself only makes sense on the board.
#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("despi-m02-crossing is firmware; build it with --target thumbv7m-none-eabi");
}
