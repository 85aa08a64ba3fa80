use shared::resource::Todos;

pub fn main() {
    frontend::run::<Todos>();
}
