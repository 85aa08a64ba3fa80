use shared::resource::Notes;

pub fn main() {
    frontend::run::<Notes>();
}
