mod list;
mod table;
mod text_input;

pub use list::{List, ListEvent, ListRow};
pub use table::{ColumnDef, Table, TableEvent, TableRow};
pub use text_input::TextInput;
