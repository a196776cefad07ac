pub mod annotation;
pub mod window;
pub mod window_table;

// re-export for cleaner imports
pub use self::annotation::{Annotation, AnnotationSet};
pub use self::window::Window;
pub use self::window_table::WindowTable;
