//! Static table definitions for the accessibility database.

/// A single column in a table definition.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    /// SQL type and constraints, e.g. `INTEGER PRIMARY KEY AUTOINCREMENT`.
    pub definition: &'static str,
}

/// A table and its ordered columns.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

const fn column(name: &'static str, definition: &'static str) -> ColumnDef {
    ColumnDef { name, definition }
}

pub const BUS_ROUTES: TableDef = TableDef {
    name: "bus_routes",
    columns: &[
        column("id", "INTEGER PRIMARY KEY AUTOINCREMENT"),
        column("name", "TEXT NOT NULL"),
        column("description", "TEXT NOT NULL"),
        column("origin", "TEXT NOT NULL"),
        column("destination", "TEXT NOT NULL"),
        column("stif_code", "TEXT NOT NULL"),
    ],
};

// route_stif_code is matched against bus_routes.stif_code by value only.
pub const BUS_STOPS: TableDef = TableDef {
    name: "bus_stops",
    columns: &[
        column("id", "INTEGER PRIMARY KEY AUTOINCREMENT"),
        column("name", "TEXT NOT NULL"),
        column("description", "TEXT"),
        column("direction", "TEXT NOT NULL"),
        column("route_stif_code", "TEXT NOT NULL"),
    ],
};

pub const ACCESSIBILITY: TableDef = TableDef {
    name: "accessibility",
    columns: &[
        column("id", "INTEGER PRIMARY KEY AUTOINCREMENT"),
        column("description", "TEXT NOT NULL"),
        column("route_id", "INTEGER REFERENCES bus_routes(id)"),
        column("stop_id", "INTEGER REFERENCES bus_stops(id)"),
    ],
};

/// Every table of the accessibility database, in creation order.
pub const SCHEMA: &[TableDef] = &[BUS_ROUTES, BUS_STOPS, ACCESSIBILITY];

impl TableDef {
    /// Render the idempotent `CREATE TABLE` statement for this table.
    pub fn create_statement(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("    {} {}", c.name, c.definition))
            .collect::<Vec<_>>()
            .join(",\n");
        format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n)", self.name, columns)
    }
}
