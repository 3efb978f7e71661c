use nopol_generate::generators::GeneratorRegistry;

fn main() {
    let registry = GeneratorRegistry::new();
    for id in registry.generator_ids() {
        let Some(generator) = registry.generator(id) else {
            continue;
        };
        let params: Vec<String> = generator
            .params()
            .iter()
            .map(|spec| format!("{}:{:?}", spec.key, spec.kind))
            .collect();
        println!("{id}\t{}", params.join(","));
    }
}
