//! SQLite schema bootstrap for the mini-world tables.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Create all tables if they don't exist.
///
/// This is idempotent, safe to call on an existing database. Existing tables
/// are never altered. Tables are `STRICT`: a value that cannot be converted
/// losslessly to its column type is rejected when the statement runs.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Open or create a mini-world database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

const SCHEMA_SQL: &str = r#"
-- Regions of the island
CREATE TABLE IF NOT EXISTS ISLAND_REGIONS (
    Region_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Region_Name TEXT NOT NULL,
    Threat_To_Intruders REAL
) STRICT;

-- Intruders and their current location
CREATE TABLE IF NOT EXISTS INTRUDERS (
    User_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL,
    Gender TEXT,
    Height REAL,
    Weight REAL,
    Intelligence INTEGER,
    Time_Of_Entry TEXT,
    Location_Id INTEGER REFERENCES ISLAND_REGIONS(Region_Id)
) STRICT;

CREATE TABLE IF NOT EXISTS MODERATORS (
    Moderator_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL
) STRICT;

-- Foodimal species and creatures
CREATE TABLE IF NOT EXISTS FOODIMALS_SPECIES (
    Species_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Species_Name TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS POPULATORY_SPECIES (
    Species_Id INTEGER PRIMARY KEY REFERENCES FOODIMALS_SPECIES(Species_Id),
    Spawn_Per_Birth INTEGER
) STRICT;

CREATE TABLE IF NOT EXISTS INDIVIDUAL_FOODIMAL_CREATURES (
    Creature_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Species_Id INTEGER NOT NULL REFERENCES FOODIMALS_SPECIES(Species_Id),
    Location_Id INTEGER REFERENCES ISLAND_REGIONS(Region_Id),
    Populatory_Species_Id INTEGER REFERENCES POPULATORY_SPECIES(Species_Id)
) STRICT;

CREATE TABLE IF NOT EXISTS ANIMAL (
    Name TEXT NOT NULL,
    Species_Id INTEGER NOT NULL REFERENCES FOODIMALS_SPECIES(Species_Id),
    PRIMARY KEY (Name, Species_Id)
) STRICT;

CREATE TABLE IF NOT EXISTS FOOD_ITEM (
    Name TEXT NOT NULL,
    Species_Id INTEGER NOT NULL REFERENCES FOODIMALS_SPECIES(Species_Id),
    PRIMARY KEY (Name, Species_Id)
) STRICT;

-- LiveCorp colonies and their cells
CREATE TABLE IF NOT EXISTS LIVECORP_COLONY (
    Colony_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Region_Id INTEGER REFERENCES ISLAND_REGIONS(Region_Id)
) STRICT;

CREATE TABLE IF NOT EXISTS LIVECORP_CELLS (
    Cell_Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Colony_Id INTEGER REFERENCES LIVECORP_COLONY(Colony_Id),
    Type TEXT
) STRICT;

-- Inventions owned by intruders
CREATE TABLE IF NOT EXISTS INVENTIONS (
    Item_Owner INTEGER NOT NULL REFERENCES INTRUDERS(User_Id),
    Item_Name TEXT NOT NULL,
    PRIMARY KEY (Item_Owner, Item_Name)
) STRICT;

CREATE TABLE IF NOT EXISTS DESCRIPTIONS (
    Description TEXT NOT NULL,
    Item_Owner_Id INTEGER NOT NULL,
    Item_Name TEXT NOT NULL,
    PRIMARY KEY (Description, Item_Owner_Id, Item_Name),
    FOREIGN KEY (Item_Owner_Id, Item_Name) REFERENCES INVENTIONS(Item_Owner, Item_Name)
) STRICT;

CREATE TABLE IF NOT EXISTS INVENTOR (
    Name TEXT NOT NULL,
    Item_Owner_Id INTEGER NOT NULL,
    Item_Name TEXT NOT NULL,
    PRIMARY KEY (Name, Item_Owner_Id, Item_Name),
    FOREIGN KEY (Item_Owner_Id, Item_Name) REFERENCES INVENTIONS(Item_Owner, Item_Name)
) STRICT;

CREATE TABLE IF NOT EXISTS WEAKNESS (
    Species_Id INTEGER NOT NULL REFERENCES FOODIMALS_SPECIES(Species_Id),
    Item_Inventor_Id INTEGER NOT NULL,
    Item_Name TEXT NOT NULL,
    PRIMARY KEY (Species_Id, Item_Inventor_Id, Item_Name),
    FOREIGN KEY (Item_Inventor_Id, Item_Name) REFERENCES INVENTIONS(Item_Owner, Item_Name)
) STRICT;

-- Event records
CREATE TABLE IF NOT EXISTS SUSPIOUS_ACTIVITIES (
    Intruder_Id INTEGER NOT NULL REFERENCES INTRUDERS(User_Id),
    Creature_Id INTEGER REFERENCES INDIVIDUAL_FOODIMAL_CREATURES(Creature_Id),
    Colony_Id INTEGER REFERENCES LIVECORP_COLONY(Colony_Id),
    Cell_Id INTEGER REFERENCES LIVECORP_CELLS(Cell_Id)
) STRICT;
CREATE INDEX IF NOT EXISTS idx_activities_colony ON SUSPIOUS_ACTIVITIES(Colony_Id);

CREATE TABLE IF NOT EXISTS COMBAT_EVENT (
    Intruder_Id INTEGER NOT NULL REFERENCES INTRUDERS(User_Id),
    Creature_Id INTEGER REFERENCES INDIVIDUAL_FOODIMAL_CREATURES(Creature_Id),
    Item_Owner_Id INTEGER NOT NULL,
    Region_Id INTEGER REFERENCES ISLAND_REGIONS(Region_Id),
    Item_Name TEXT NOT NULL,
    FOREIGN KEY (Item_Owner_Id, Item_Name) REFERENCES INVENTIONS(Item_Owner, Item_Name)
) STRICT;
CREATE INDEX IF NOT EXISTS idx_combat_item ON COMBAT_EVENT(Item_Owner_Id, Item_Name);

CREATE TABLE IF NOT EXISTS CREATES (
    Moderator_Id INTEGER NOT NULL REFERENCES MODERATORS(Moderator_Id),
    Species_Id INTEGER REFERENCES FOODIMALS_SPECIES(Species_Id),
    Creature_Id INTEGER REFERENCES INDIVIDUAL_FOODIMAL_CREATURES(Creature_Id)
) STRICT;
"#;
