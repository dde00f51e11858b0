use std::rc::Rc;

use ccmenu_core::*;
use ccmenu_ui::*;

struct AppState {
    presented: Signal<bool>,
    wifi: Signal<bool>,
    bluetooth: Signal<bool>,
    airdrop: Signal<bool>,
    show_devices: Signal<bool>,
}

impl AppState {
    fn new() -> Self {
        Self {
            presented: signal(true),
            wifi: signal(true),
            bluetooth: signal(true),
            airdrop: signal(false),
            show_devices: signal(false),
        }
    }
}

struct DemoApp;

impl HostApp for DemoApp {
    fn activate(&self) {
        log::info!("app activated");
    }

    fn open_settings(&self) {
        log::info!("settings window requested");
    }
}

const DEVICES: [&str; 3] = ["AirPods Pro", "Living Room", "Keyboard"];

fn app(s: &AppState) -> MenuBody {
    menu![
        MenuToggle("Wi-Fi", Binding::from_signal(&s.wifi))
            .on_change(|on| log::info!("Wi-Fi is now {}", if on { "on" } else { "off" })),
        if s.wifi.get() => MenuContent("Home Network", 22.0),
        MenuToggle("Bluetooth", Binding::from_signal(&s.bluetooth)),
        MenuToggle("AirDrop", Binding::from_signal(&s.airdrop))
            .color(Color::WHITE)
            .invert_foreground(true),
        MenuToggle("Static On", Binding::constant(true))
            .on_change(|v| log::info!("static toggle clicked, still {v}")),
        MenuDisclosureGroup(
            "Devices",
            Binding::from_signal(&s.show_devices),
            menu![for d in DEVICES => MenuCommand(d, move || log::info!("connect {d}"))
                .dismisses_menu(false)],
        ),
        MenuScrollView(
            120.0,
            menu![for i in 1..=12 => MenuContent(format!("Recent item {i}"), 20.0)]
        ),
        MenuCommand("Eject Disk", || log::info!("ejected")).style(MenuCommandStyle::Menu),
        MenuSettingsCommand("Control Center Settings…"),
    ]
}

fn click_row(host: &mut MenuHost, label: &str) -> anyhow::Result<()> {
    let r = host
        .frame()
        .row(label)
        .filter(|r| r.visible)
        .map(|r| r.hit_rect())
        .ok_or_else(|| anyhow::anyhow!("no visible row labelled {label:?}"))?;
    let (x, y) = (r.x + 8.0, r.y + r.h / 2.0);
    host.handle_pointer(&PointerEvent::moved(x, y));
    host.handle_pointer(&PointerEvent::down(x, y));
    host.handle_pointer(&PointerEvent::up(x, y));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scheme = std::env::var("CCMENU_APPEARANCE")
        .map(|name| ColorScheme::from_appearance_name(&name))
        .unwrap_or_default();
    let config = MenuConfig {
        command_style: match std::env::var("CCMENU_STYLE").as_deref() {
            Ok("menu") => MenuCommandStyle::Menu,
            _ => MenuCommandStyle::ControlCenter,
        },
        ..MenuConfig::default()
    };
    config.validate()?;

    let clock = ManualClock::new();
    let ev = EventLoop::with_clock(clock.clone());
    let state = AppState::new();
    let ctx = CommitContext::new(Rc::new(DemoApp), Binding::from_signal(&state.presented));
    let mut host = MenuHost::with_config(&ev, ctx, config);

    with_color_scheme(scheme, || -> anyhow::Result<()> {
        println!("{}\n", host.compose(app(&state)));

        click_row(&mut host, "Wi-Fi")?;
        click_row(&mut host, "Static On")?;
        click_row(&mut host, "Devices")?;
        host.compose(app(&state));
        ev.run_until_idle(&clock)?;
        println!("{}\n", host.compose(app(&state)));

        let recent = host
            .frame()
            .row("Recent item 1")
            .and_then(|r| r.clip)
            .ok_or_else(|| anyhow::anyhow!("scroll region not laid out"))?;
        let leftover = host.handle_scroll(Vec2::new(10.0, recent.y + 10.0), 500.0);
        log::info!("scrolled recents, {leftover} left over");

        click_row(&mut host, "Living Room")?;
        click_row(&mut host, "Eject Disk")?;
        ev.run_until_idle(&clock)?;
        click_row(&mut host, "Control Center Settings…")?;

        println!("{}", host.compose(app(&state)));
        log::info!("popover presented: {}", state.presented.get());
        Ok(())
    })
}
