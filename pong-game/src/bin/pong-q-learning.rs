use egui::{Context, Id, LayerId, Order, Vec2};

use pong_game::control_loop::{ControlLoop, FrameInput, FramePacer, LoopControl};
use pong_game::environment::pong::app_game_drawer::AppGameDrawer;
use pong_game::environment::pong::mechanics::{FIELD_HEIGHT, FIELD_WIDTH};
use pong_game::observer::LogObserver;
use pong_game::simulation::Simulation;
use pong_game::util::init_logging;
use ql::q_table::Parameter;

pub struct PongApp {
    control_loop: ControlLoop,
}

impl PongApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        control_loop: ControlLoop,
    ) -> Self {
        Self { control_loop }
    }

    fn read_ui_control(
        &self,
        ctx: &Context,
    ) -> FrameInput {
        FrameInput {
            quit: ctx.input(|i| i.key_pressed(egui::Key::Escape)),
        }
    }
}

impl eframe::App for PongApp {
    fn update(
        &mut self,
        ctx: &Context,
        frame: &mut eframe::Frame,
    ) {
        let input = self.read_ui_control(ctx);
        let game_painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("game")));
        let mut canvas = AppGameDrawer::new(&game_painter);

        match self.control_loop.iterate(input, &mut canvas) {
            Ok(LoopControl::Continue) => ctx.request_repaint(),
            Ok(LoopControl::Quit) => frame.close(),
            Err(e) => {
                log::error!("{:?}", e);
                std::process::exit(1);
            }
        }
    }
}

/// vsync off: the [FramePacer] is the only frame limiter
fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        initial_window_size: Some(Vec2::new(FIELD_WIDTH as f32, FIELD_HEIGHT as f32)),
        resizable: false,
        vsync: false,
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    }
}

fn pong_q_learning_game(seed: u64) -> eframe::Result<()> {
    let simulation = Simulation::new(seed, Parameter::default())
        .with_observer(Box::new(LogObserver));
    let control_loop = ControlLoop::new(simulation, FramePacer::default());

    eframe::run_native(
        "Pong with Q-learning",
        native_options(),
        Box::new(move |cc| Box::new(PongApp::new(cc, control_loop))),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let seed: u64 = rand::random();
    log::info!("seed: {}", seed);
    pong_q_learning_game(seed)?;
    Ok(())
}
