use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    let [display] = Layout::horizontal([consts::DISPLAY_SIZE.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([consts::DISPLAY_SIZE.height])
        .flex(Flex::Center)
        .areas(display);
    display
}

pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height]).flex(Flex::Center).areas(area);
    area
}
