// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub const TS_BLOCK: &str = r#"interface Repository<T> extends Disposable {
  findById(id: string): Promise<T | undefined>;
  save(entity: T): Promise<void>;
}

export class UserService implements Repository<User> {
  private readonly cache = new Map<string, User>();

  constructor(private readonly client: ApiClient) {}

  async findById(id: string): Promise<User | undefined> {
    const cached = this.cache.get(id);
    if (cached) return cached;
    const res = await fetch(`/api/users/${id}`);
    return res.ok ? res.json() : undefined;
  }

  async save(user: User): Promise<void> {
    await Promise.all([this.client.put(user), this.audit(user)]);
  }
}
"#;

#[allow(dead_code)]
pub fn generate_docs_page(blocks: usize) -> String {
    let mut content = String::from("# Patterns\n\nA DD on repositories.\n\n");
    for i in 0..blocks {
        content.push_str(&format!("## Example {i}\n\nSome prose.\n\n```ts\n{TS_BLOCK}```\n\n"));
    }
    content
}
