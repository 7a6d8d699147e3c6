use drw::cursor::shape;
use drw::render::backends::xlib::XlibBackend;
use drw::{ClrScheme, Cur, Drw, Fatal};
use std::rc::Rc;
use std::time::Duration;

const FONT: &str = "monospace:size=10";
const TAGS: &[&str] = &["1", "2", "3", "4", "5"];

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Connect to $DISPLAY and lay a bar across the top of the default screen.
    let backend = Rc::new(XlibBackend::open(None)?);
    let screen = backend.default_screen();
    let root = backend.root_window(screen);
    let sw = backend.display_width(screen);

    let mut drw = Drw::create(backend.clone(), screen, root, sw, 1)?;
    let font = Rc::new(drw.font_create(FONT).or_die());
    let bh = (font.h() + 2) as u32;
    drw.resize(sw, bh)?;
    drw.set_font(font);

    // Font and color failures are fatal for a bar, exactly like in dwm.
    let norm = Rc::new(ClrScheme::create(&drw, "#bbbbbb", "#222222", "#444444").or_die());
    let sel = Rc::new(ClrScheme::create(&drw, "#eeeeee", "#005577", "#005577").or_die());
    let _cursor = Cur::create(&drw, shape::LEFT_PTR)?;

    let win = backend.create_bar_window(screen, 0, 0, sw, bh);

    let mut x = 0;
    for (i, tag) in TAGS.iter().enumerate() {
        let w = drw.font_getexts_width(tag, tag.len()).unwrap_or(0) + bh;
        drw.set_scheme(if i == 0 { sel.clone() } else { norm.clone() });
        drw.text(x, 0, w, bh, Some(*tag));
        drw.rect(x, 0, w, bh, i == 0, i == 2, false);
        drw.underbar(x, 0, w, bh, i == 0);
        x += w as i32;
    }

    drw.set_scheme(sel.clone());
    let title = "a window title far too long to fit in what is left of the bar once the status is drawn";
    let status = "drw demo";
    let sw_status = drw.font_getexts_width(status, status.len()).unwrap_or(0) + bh;
    let title_w = (sw as i32 - x - sw_status as i32).max(0) as u32;
    drw.text(x, 0, title_w, bh, Some(title));

    drw.set_scheme(norm);
    drw.text(sw as i32 - sw_status as i32, 0, sw_status, bh, Some(status));
    drw.map(win, 0, 0, sw, bh);

    log::info!("bar drawn, exiting in 5 seconds");
    std::thread::sleep(Duration::from_secs(5));

    drop(sel);
    drw.free();
    backend.destroy_window(win);
    Ok(())
}
