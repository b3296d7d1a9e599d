//! Schema provisioner - the bootstrap script an operator runs once on the hosted backend.
//!
//! The script is only generated here, never executed. Every statement is guarded
//! (`if not exists`, or `drop ... if exists` before `create`) so running it again is a no-op.

/// One commented block of the bootstrap script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSection {
    /// Heading rendered as a SQL comment
    pub title: &'static str,
    /// Statements, possibly with inline comments
    pub sql: &'static str,
}

const EXTENSIONS: &str = r#"create extension if not exists "uuid-ossp";"#;

const ORDERS: &str = "create table if not exists orders (
  id uuid default uuid_generate_v4() primary key,
  human_id text not null,
  user_id text not null,
  client_phone text,
  topic_id text,
  package_id text,
  consultation_type text,
  status text,
  price_paid numeric,
  transaction_ref text,
  created_at timestamp with time zone default timezone('utc'::text, now()) not null
);
-- Older deployments predate client_phone
alter table orders add column if not exists client_phone text;";

const MESSAGES: &str = "create table if not exists messages (
  id uuid default uuid_generate_v4() primary key,
  order_id uuid references orders(id) on delete cascade,
  sender_id text,
  content text,
  message_type text default 'text',
  created_at timestamp with time zone default timezone('utc'::text, now()) not null
);";

const REVIEWS: &str = "create table if not exists reviews (
  id uuid default uuid_generate_v4() primary key,
  order_id uuid references orders(id),
  lawyer_id text,
  user_id text,
  stars integer,
  comment text,
  created_at timestamp with time zone default timezone('utc'::text, now()) not null
);";

const SYSTEM_CONFIGS: &str = "create table if not exists system_configs (
  id uuid default uuid_generate_v4() primary key,
  category text not null,
  key text not null unique,
  value text,
  description text,
  is_active boolean default true,
  created_at timestamp with time zone default timezone('utc'::text, now()) not null
);";

const ROW_LEVEL_SECURITY: &str = "-- WARNING: the policies below allow public access to every row.
-- They are meant for a prototype; replace them before going to production.
alter table orders enable row level security;
alter table messages enable row level security;
alter table reviews enable row level security;
alter table system_configs enable row level security;";

const POLICIES: &str = r#"drop policy if exists "Public Access Orders" on orders;
create policy "Public Access Orders" on orders for all using (true) with check (true);

drop policy if exists "Public Access Messages" on messages;
create policy "Public Access Messages" on messages for all using (true) with check (true);

drop policy if exists "Public Access Reviews" on reviews;
create policy "Public Access Reviews" on reviews for all using (true) with check (true);

drop policy if exists "Public Access Configs" on system_configs;
create policy "Public Access Configs" on system_configs for all using (true) with check (true);"#;

const REALTIME: &str = "begin;
  drop publication if exists supabase_realtime;
  create publication supabase_realtime for table messages;
commit;";

/// Ordered sections of the bootstrap script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapScript {
    sections: Vec<ScriptSection>,
}

impl Default for BootstrapScript {
    fn default() -> Self {
        Self {
            sections: vec![
                ScriptSection {
                    title: "EXTENSIONS",
                    sql: EXTENSIONS,
                },
                ScriptSection {
                    title: "ORDERS TABLE",
                    sql: ORDERS,
                },
                ScriptSection {
                    title: "MESSAGES TABLE",
                    sql: MESSAGES,
                },
                ScriptSection {
                    title: "REVIEWS TABLE",
                    sql: REVIEWS,
                },
                ScriptSection {
                    title: "SYSTEM CONFIGS TABLE (Admin Panel)",
                    sql: SYSTEM_CONFIGS,
                },
                ScriptSection {
                    title: "ROW LEVEL SECURITY",
                    sql: ROW_LEVEL_SECURITY,
                },
                ScriptSection {
                    title: "ACCESS POLICIES (dropped first so re-runs do not fail)",
                    sql: POLICIES,
                },
                ScriptSection {
                    title: "REALTIME PUBLICATION",
                    sql: REALTIME,
                },
            ],
        }
    }
}

impl BootstrapScript {
    /// Sections in execution order.
    #[must_use]
    pub fn sections(&self) -> &[ScriptSection] {
        &self.sections
    }

    /// Full script text, ready to paste into the backend's SQL editor.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("-- {}. {}\n", index + 1, section.title));
            out.push_str(section.sql);
            out.push('\n');
        }
        out
    }

    /// Executable statements with comments stripped, lowercased and whitespace-collapsed.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|section| {
                let code: String = section
                    .sql
                    .lines()
                    .filter(|line| !line.trim_start().starts_with("--"))
                    .collect::<Vec<_>>()
                    .join(" ");
                code.split(';')
                    .map(|stmt| {
                        stmt.split_whitespace()
                            .collect::<Vec<_>>()
                            .join(" ")
                            .to_lowercase()
                    })
                    .filter(|stmt| !stmt.is_empty())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// The standard bootstrap script text.
#[must_use]
pub fn bootstrap_script() -> String {
    BootstrapScript::default().render()
}
