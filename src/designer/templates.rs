//! Built-in SQL templates offered by the designer

/// A named snippet of starter SQL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlTemplate {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const BASIC_TABLE: SqlTemplate = SqlTemplate {
    name: "Basic Table",
    sql: "CREATE TABLE example_table (
  id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
  name TEXT NOT NULL,
  description TEXT,
  created_at TIMESTAMP WITH TIME ZONE DEFAULT now(),
  updated_at TIMESTAMP WITH TIME ZONE DEFAULT now()
);

-- Add trigger to update updated_at
CREATE TRIGGER update_example_table_updated_at
  BEFORE UPDATE ON example_table
  FOR EACH ROW
  EXECUTE FUNCTION update_updated_at_column();",
};

pub const TABLE_WITH_RLS: SqlTemplate = SqlTemplate {
    name: "Table with RLS",
    sql: "CREATE TABLE user_data (
  id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
  user_id UUID REFERENCES auth.users(id) NOT NULL,
  data JSONB,
  created_at TIMESTAMP WITH TIME ZONE DEFAULT now()
);

-- Enable RLS
ALTER TABLE user_data ENABLE ROW LEVEL SECURITY;

-- RLS Policy
CREATE POLICY \"Users can view own data\"
  ON user_data
  FOR SELECT
  USING (auth.uid() = user_id);",
};

pub const SQL_TEMPLATES: [SqlTemplate; 2] = [BASIC_TABLE, TABLE_WITH_RLS];

/// Look up a template by name, ignoring case
pub fn find(name: &str) -> Option<&'static SqlTemplate> {
    SQL_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}
