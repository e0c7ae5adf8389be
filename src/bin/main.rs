fn main() {
  xcp_composer::main();
}
