pub mod chat_loop;
pub mod renderer;
pub mod sidebar;
pub mod theme;
pub mod thread;
