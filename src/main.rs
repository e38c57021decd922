fn main() {
    game::run();
}
