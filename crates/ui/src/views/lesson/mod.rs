mod lab;
mod phases;
mod view;

pub use view::LessonView;
